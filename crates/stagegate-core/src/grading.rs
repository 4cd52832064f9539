//! # Stage Grading
//!
//! Pure evaluation of a stage's recorded answers.
//!
//! Grading is binary per question (correct or not) with exact string
//! equality. There is no partial credit and no score beyond the count of
//! missing and wrong answers; the only thing progression cares about is
//! whether a stage is complete.

use crate::{QuestionId, Stage};
use serde::Serialize;
use std::collections::BTreeMap;

/// Answers recorded for the current stage, keyed by question id.
pub type Answers = BTreeMap<QuestionId, String>;

// =============================================================================
// QUESTION GRADE
// =============================================================================

/// Grade of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// No answer recorded.
    Unanswered,
    /// Recorded answer equals the correct answer.
    Correct,
    /// Recorded answer differs from the correct answer.
    Incorrect,
}

// =============================================================================
// STAGE EVALUATION
// =============================================================================

/// Result of grading every question of a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEvaluation {
    grades: Vec<(QuestionId, Grade)>,
}

impl StageEvaluation {
    /// Grade every question of `stage` against `answers`.
    #[must_use]
    pub fn evaluate(stage: &Stage, answers: &Answers) -> Self {
        let grades = stage
            .questions
            .iter()
            .map(|question| {
                let grade = match answers.get(&question.id) {
                    None => Grade::Unanswered,
                    Some(answer) if question.is_correct(answer) => Grade::Correct,
                    Some(_) => Grade::Incorrect,
                };
                (question.id, grade)
            })
            .collect();

        Self { grades }
    }

    /// Per-question grades in question order.
    #[must_use]
    pub fn grades(&self) -> &[(QuestionId, Grade)] {
        &self.grades
    }

    /// Grade of one question, if it belongs to the evaluated stage.
    #[must_use]
    pub fn grade(&self, question: QuestionId) -> Option<Grade> {
        self.grades
            .iter()
            .find(|(id, _)| *id == question)
            .map(|(_, grade)| *grade)
    }

    /// Number of questions without an answer.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.count(Grade::Unanswered)
    }

    /// Number of answered but wrong questions.
    #[must_use]
    pub fn wrong(&self) -> usize {
        self.count(Grade::Incorrect)
    }

    /// Every question has an answer.
    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.missing() == 0
    }

    /// Every question is answered correctly.
    #[must_use]
    pub fn all_correct(&self) -> bool {
        self.grades.iter().all(|(_, grade)| *grade == Grade::Correct)
    }

    fn count(&self, wanted: Grade) -> usize {
        self.grades.iter().filter(|(_, grade)| *grade == wanted).count()
    }
}

/// The stage-complete predicate: feedback revealed and every answer correct.
///
/// This is the sole unlock condition for advancing past a stage.
#[must_use]
pub fn is_stage_complete(stage: &Stage, answers: &Answers, feedback_revealed: bool) -> bool {
    feedback_revealed && StageEvaluation::evaluate(stage, answers).all_correct()
}

// =============================================================================
// TESTS
// =============================================================================
