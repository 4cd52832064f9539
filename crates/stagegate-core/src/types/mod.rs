//! # Core Type Definitions
//!
//! This module contains the data model consumed by the progression engine:
//! - Identifiers (`StageId`, `QuestionId`)
//! - Catalog content (`Question`, `Stage`, `Content`, `ThemeTag`, `StageIcon`)
//! - Controller operations (`Operation`) and caller-contract errors (`QuizError`)
//!
//! ## Determinism Guarantees
//!
//! All identifier types implement `Ord` so they can key `BTreeMap`/`BTreeSet`.
//! Answer comparison is exact string equality; no normalization is applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a stage. Stages are consumed in ascending id order, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub u32);

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a question, unique within its owning stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// PRESENTATION TAGS (opaque to the controller)
// =============================================================================

/// Opaque study-content payload of a stage.
///
/// The renderer decides how to interpret it (plain text, markdown, ...).
/// The engine only carries it through to the view model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content(pub String);

impl Content {
    /// Create a content payload.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    /// Get the raw payload.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Theme tag of a stage (a colour family name such as `"purple"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeTag(pub String);

impl ThemeTag {
    /// Create a theme tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Get the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Icon shown next to a stage title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageIcon {
    #[default]
    Book,
    Brain,
    Flask,
    Eye,
}

impl StageIcon {
    /// Get the icon name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StageIcon::Book => "book",
            StageIcon::Brain => "brain",
            StageIcon::Flask => "flask",
            StageIcon::Eye => "eye",
        }
    }
}

// =============================================================================
// QUESTION
// =============================================================================

/// A multiple-choice question.
///
/// Invariant (checked by `StageCatalog::new`): a non-zero id, at least two
/// distinct options, and `correct_answer` appears verbatim among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    /// Identifier, unique within the owning stage.
    pub id: QuestionId,
    /// Prompt text.
    pub prompt: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// The one correct option.
    pub correct_answer: String,
}

impl Question {
    /// Create a question.
    #[must_use]
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options,
            correct_answer: correct_answer.into(),
        }
    }

    /// Check whether `option` is one of this question's options.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Check an answer by exact string equality.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

// =============================================================================
// STAGE
// =============================================================================

/// One unit of study content plus the questions that gate the next stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stage {
    /// Identifier; defines catalog order.
    pub id: StageId,
    /// Stage title.
    pub title: String,
    /// Theme tag, used only for presentation.
    #[serde(default)]
    pub theme: ThemeTag,
    /// Icon, used only for presentation.
    #[serde(default)]
    pub icon: StageIcon,
    /// Study content.
    #[serde(default)]
    pub content: Content,
    /// Questions in display order. Never empty in a validated catalog.
    pub questions: Vec<Question>,
}

impl Stage {
    /// Create a stage with default theme and icon.
    #[must_use]
    pub fn new(
        id: StageId,
        title: impl Into<String>,
        content: Content,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            theme: ThemeTag::default(),
            icon: StageIcon::default(),
            content,
            questions,
        }
    }

    /// Set the theme tag.
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeTag) -> Self {
        self.theme = theme;
        self
    }

    /// Set the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: StageIcon) -> Self {
        self.icon = icon;
        self
    }

    /// Find a question of this stage by id.
    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// The write operations a presentation layer may invoke on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Begin,
    SelectAnswer,
    CheckAnswers,
    Advance,
    Reset,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Begin => "begin",
            Operation::SelectAnswer => "select answer",
            Operation::CheckAnswers => "check answers",
            Operation::Advance => "advance",
            Operation::Reset => "reset",
        };
        f.write_str(name)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Caller-contract violations reported by the controller.
///
/// None of these are user-facing conditions; user-correctable problems are
/// surfaced through the session's status message instead. The controller
/// refuses the mutation whenever it returns one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The question does not belong to the current stage.
    #[error("question {question} is not part of stage {stage}")]
    InvalidQuestion { stage: StageId, question: QuestionId },

    /// The option is not one of the question's options.
    #[error("option {option:?} is not offered by question {question}")]
    InvalidOption { question: QuestionId, option: String },

    /// The operation is not allowed in the current session state.
    #[error("illegal transition: cannot {operation} while {reason}")]
    IllegalTransition {
        operation: Operation,
        reason: &'static str,
    },
}

// =============================================================================
// TESTS
// =============================================================================
