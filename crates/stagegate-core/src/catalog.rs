//! # Stage Catalog
//!
//! The ordered, immutable set of stages a session progresses through.
//!
//! A `StageCatalog` can only be obtained through [`StageCatalog::new`], which
//! checks every structural invariant up front. The controller and the view
//! model rely on those invariants instead of re-checking them:
//!
//! - at least one stage
//! - stage ids are contiguous and strictly increasing, starting at 1
//! - every stage has at least one question
//! - question ids are unique within a stage
//! - every question has at least two options and its correct answer is one of them

use crate::{Question, QuestionId, Stage, StageId};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

// =============================================================================
// ERRORS
// =============================================================================

/// Structural problems found while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog has no stages.
    #[error("catalog has no stages")]
    Empty,

    /// Stage ids do not run 1, 2, 3, ...
    #[error("expected stage id {expected}, found {found}")]
    NonContiguousStageId { expected: StageId, found: StageId },

    /// A stage has no questions.
    #[error("stage {0} has no questions")]
    EmptyStage(StageId),

    /// Question ids start at 1.
    #[error("stage {stage} declares question id 0, ids start at 1")]
    ZeroQuestionId { stage: StageId },

    /// Two questions of a stage share an id.
    #[error("stage {stage} declares question {question} more than once")]
    DuplicateQuestion { stage: StageId, question: QuestionId },

    /// A question offers fewer than two options.
    #[error("question {question} offers {count} option(s), at least 2 are required")]
    TooFewOptions { question: QuestionId, count: usize },

    /// An option text appears twice in one question.
    #[error("question {question} offers option {option:?} more than once")]
    DuplicateOption { question: QuestionId, option: String },

    /// The correct answer is not among the options.
    #[error("correct answer of question {question} is not one of its options")]
    MissingCorrectAnswer { question: QuestionId },
}

// =============================================================================
// METADATA
// =============================================================================

/// Presentation text for the screens outside of stages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CatalogInfo {
    /// Quiz title.
    pub title: String,
    /// Start screen text.
    pub intro: String,
    /// Completion screen text.
    pub outro: String,
}

impl CatalogInfo {
    /// Create catalog metadata.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        intro: impl Into<String>,
        outro: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            intro: intro.into(),
            outro: outro.into(),
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// A validated, ordered, immutable sequence of stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCatalog {
    info: CatalogInfo,
    stages: Vec<Stage>,
}

impl StageCatalog {
    /// Build a catalog, validating every structural invariant.
    ///
    /// Stages are taken in the given order; they are not sorted.
    pub fn new(info: CatalogInfo, stages: Vec<Stage>) -> Result<Self, CatalogError> {
        if stages.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, stage) in stages.iter().enumerate() {
            let expected = StageId(index as u32 + 1);
            if stage.id != expected {
                return Err(CatalogError::NonContiguousStageId {
                    expected,
                    found: stage.id,
                });
            }
            validate_stage(stage)?;
        }

        Ok(Self { info, stages })
    }

    /// Catalog metadata.
    #[must_use]
    pub fn info(&self) -> &CatalogInfo {
        &self.info
    }

    /// Number of stages (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// A validated catalog is never empty; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage at a 0-based position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// Stage by id.
    #[must_use]
    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.stages.get(index))
    }

    /// Whether the 0-based position is the final stage.
    #[must_use]
    pub fn is_last(&self, index: usize) -> bool {
        index.saturating_add(1) == self.stages.len()
    }

    /// Total number of questions across all stages.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.stages.iter().map(|s| s.questions.len()).sum()
    }

    /// Iterate stages in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.stages.iter()
    }

    /// Rebuild the catalog with every question passed through `f`.
    ///
    /// Used by presentation layers to reorder options. The result is
    /// validated again, so `f` cannot break the catalog invariants.
    pub fn map_questions<F>(self, mut f: F) -> Result<Self, CatalogError>
    where
        F: FnMut(Question) -> Question,
    {
        let stages = self
            .stages
            .into_iter()
            .map(|mut stage| {
                stage.questions = stage.questions.into_iter().map(&mut f).collect();
                stage
            })
            .collect();
        Self::new(self.info, stages)
    }
}

impl<'a> IntoIterator for &'a StageCatalog {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

fn validate_stage(stage: &Stage) -> Result<(), CatalogError> {
    if stage.questions.is_empty() {
        return Err(CatalogError::EmptyStage(stage.id));
    }

    let mut seen = BTreeSet::new();
    for question in &stage.questions {
        if question.id.0 == 0 {
            return Err(CatalogError::ZeroQuestionId { stage: stage.id });
        }
        if !seen.insert(question.id) {
            return Err(CatalogError::DuplicateQuestion {
                stage: stage.id,
                question: question.id,
            });
        }
        if question.options.len() < MIN_OPTIONS {
            return Err(CatalogError::TooFewOptions {
                question: question.id,
                count: question.options.len(),
            });
        }
        let mut options = BTreeSet::new();
        if let Some(repeated) = question.options.iter().find(|o| !options.insert(o.as_str())) {
            return Err(CatalogError::DuplicateOption {
                question: question.id,
                option: repeated.clone(),
            });
        }
        if !question.has_option(&question.correct_answer) {
            return Err(CatalogError::MissingCorrectAnswer {
                question: question.id,
            });
        }
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
