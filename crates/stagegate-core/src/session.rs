//! # Session Module
//!
//! The mutable state of one play-through.
//!
//! - Created in `NotStarted`
//! - Mutated only by [`ProgressionController`](crate::ProgressionController)
//! - Stage-local state (answers, feedback, status) is cleared on every stage change
//! - Never persisted; a restart builds a fresh session
//!
//! Readers get accessors only. There is no process-wide session: every
//! controller owns its own, so independent sessions can coexist.

use crate::QuestionId;
use crate::grading::Answers;
use serde::{Deserialize, Serialize};

// =============================================================================
// PHASE
// =============================================================================

/// Coarse position of a session in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// On the start screen.
    #[default]
    NotStarted,
    /// Working through a stage.
    InProgress,
    /// Every stage completed. Terminal until reset.
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::NotStarted => "not started",
            Phase::InProgress => "in progress",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

// =============================================================================
// STATUS MESSAGE
// =============================================================================

/// User-correctable condition shown alongside a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMessage {
    /// A check was requested before every question had an answer.
    Incomplete,
    /// A check revealed at least one wrong answer.
    IncorrectAnswers,
}

impl StatusMessage {
    /// Human-readable text.
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            StatusMessage::Incomplete => "Please answer all questions before proceeding.",
            StatusMessage::IncorrectAnswers => {
                "Some answers are incorrect. Review the notes and try again!"
            }
        }
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Per-playthrough state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub(crate) phase: Phase,
    pub(crate) stage_index: usize,
    pub(crate) answers: Answers,
    pub(crate) feedback_revealed: bool,
    pub(crate) status: Option<StatusMessage>,
}

impl Session {
    /// Create a session on the start screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 0-based index of the current stage; `None` unless in progress.
    #[must_use]
    pub fn current_stage_index(&self) -> Option<usize> {
        (self.phase == Phase::InProgress).then_some(self.stage_index)
    }

    /// Answers recorded for the current stage.
    #[must_use]
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Recorded answer for one question of the current stage.
    #[must_use]
    pub fn answer(&self, question: QuestionId) -> Option<&str> {
        self.answers.get(&question).map(String::as_str)
    }

    /// Whether correctness has been checked and is shown.
    #[must_use]
    pub fn feedback_revealed(&self) -> bool {
        self.feedback_revealed
    }

    /// Current status message, if any applies.
    #[must_use]
    pub fn status(&self) -> Option<StatusMessage> {
        self.status
    }

    /// Move to the stage at `index` with empty stage-local state.
    pub(crate) fn enter_stage(&mut self, index: usize) {
        self.phase = Phase::InProgress;
        self.stage_index = index;
        self.clear_stage_state();
    }

    /// Enter the terminal phase.
    pub(crate) fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.stage_index = 0;
        self.clear_stage_state();
    }

    fn clear_stage_state(&mut self) {
        self.answers.clear();
        self.feedback_revealed = false;
        self.status = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_not_started() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(session.current_stage_index(), None);
        assert!(session.answers().is_empty());
        assert!(!session.feedback_revealed());
        assert_eq!(session.status(), None);
    }

    #[test]
    fn enter_stage_clears_stage_state() {
        let mut session = Session::new();
        session.enter_stage(0);
        session.answers.insert(QuestionId(1), "a".into());
        session.feedback_revealed = true;
        session.status = Some(StatusMessage::IncorrectAnswers);

        session.enter_stage(1);
        assert_eq!(session.current_stage_index(), Some(1));
        assert!(session.answers().is_empty());
        assert!(!session.feedback_revealed());
        assert_eq!(session.status(), None);
    }

    #[test]
    fn finished_session_has_no_stage_index() {
        let mut session = Session::new();
        session.enter_stage(3);
        session.finish();
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.current_stage_index(), None);
    }

    #[test]
    fn status_text() {
        assert_eq!(
            StatusMessage::Incomplete.to_string(),
            "Please answer all questions before proceeding."
        );
        assert!(StatusMessage::IncorrectAnswers.text().starts_with("Some answers are incorrect"));
    }
}
