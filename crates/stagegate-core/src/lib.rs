//! # stagegate-core
//!
//! The deterministic progression engine for stagegate - THE LOGIC.
//!
//! A learner works through an ordered catalog of stages. Each stage pairs
//! study content with multiple-choice questions, and the next stage unlocks
//! only once every question of the current one is answered correctly.
//!
//! ## Architecture
//!
//! ```text
//! StageCatalog (validated, immutable)
//!        │ borrowed by
//!        ▼
//! ProgressionController ── owns ──▶ Session (phase, stage, answers, feedback, status)
//!        │ current_view()
//!        ▼
//! ViewModel (pure projection, serializable) ──▶ rendering layer
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no I/O, no logging dependency
//! - Deterministic: no randomness; option order is whatever the catalog holds
//! - Closed: the session is mutated only through the controller
//! - Never panics; caller mistakes come back as `QuizError`

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod controller;
pub mod grading;
pub mod session;
pub mod types;
pub mod view;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{
    Content, Operation, Question, QuestionId, QuizError, Stage, StageIcon, StageId, ThemeTag,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use catalog::{CatalogError, CatalogInfo, StageCatalog};
pub use controller::{Advanced, CheckOutcome, ProgressionController, Selection};
pub use grading::{Answers, Grade, StageEvaluation, is_stage_complete};
pub use session::{Phase, Session, StatusMessage};
pub use view::{
    FinishedView, OptionClass, OptionView, QuestionView, StageMarker, StageView, StartView,
    ViewModel,
};
