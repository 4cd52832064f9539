//! # Progression Controller
//!
//! The finite-state machine that owns a [`Session`] and exposes the only
//! write interface to it.
//!
//! ```text
//! NotStarted --begin()--> InProgress --advance() on last stage--> Finished
//! InProgress --advance() (stage complete)--> InProgress (next stage, stage state cleared)
//! InProgress --reset()--> NotStarted
//! Finished   --reset()--> NotStarted
//! ```
//!
//! `select_answer` and `check_answers` self-transition inside `InProgress`.
//!
//! ## Contract
//!
//! Caller mistakes (unknown question, advancing an incomplete stage, acting
//! outside a stage) are refused with a [`QuizError`] and leave the session
//! untouched. User mistakes (missing or wrong answers) are not errors: they
//! are reported through the session's status message.
//!
//! ## Retry policy
//!
//! While feedback is revealed for a stage that is *not* complete, selecting
//! an answer hides the feedback again and records the selection, so the
//! learner can correct mistakes and re-check. Once a stage is complete its
//! answers are locked until the next stage change.

use crate::grading::{StageEvaluation, is_stage_complete};
use crate::session::{Phase, Session, StatusMessage};
use crate::view::ViewModel;
use crate::{Operation, QuestionId, QuizError, Stage, StageCatalog};

// =============================================================================
// OUTCOMES
// =============================================================================

/// What `select_answer` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The selection was recorded.
    Recorded,
    /// Feedback for an incorrect stage was hidden and the selection recorded.
    Reopened,
    /// The stage is complete; the selection was ignored.
    Locked,
}

/// What `check_answers` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Some questions have no answer; feedback stays hidden.
    Incomplete { missing: usize },
    /// Feedback revealed; some answers are wrong.
    Incorrect { wrong: usize },
    /// Feedback revealed; every answer is correct.
    Passed,
}

/// Where `advance` moved the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    /// Now on the stage at this 0-based index.
    NextStage(usize),
    /// The last stage was completed.
    Finished,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Drives one session through a catalog.
#[derive(Debug, Clone)]
pub struct ProgressionController<'c> {
    catalog: &'c StageCatalog,
    session: Session,
}

impl<'c> ProgressionController<'c> {
    /// Create a controller with a fresh session on the start screen.
    #[must_use]
    pub fn new(catalog: &'c StageCatalog) -> Self {
        Self {
            catalog,
            session: Session::new(),
        }
    }

    /// The catalog being played.
    #[must_use]
    pub fn catalog(&self) -> &'c StageCatalog {
        self.catalog
    }

    /// Read-only view of the session state.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The stage being worked on, if any.
    #[must_use]
    pub fn current_stage(&self) -> Option<&'c Stage> {
        self.session
            .current_stage_index()
            .and_then(|index| self.catalog.get(index))
    }

    /// The stage-complete predicate for the current stage.
    #[must_use]
    pub fn is_stage_complete(&self) -> bool {
        self.current_stage().is_some_and(|stage| {
            is_stage_complete(stage, &self.session.answers, self.session.feedback_revealed)
        })
    }

    /// Enter the first stage with empty stage state.
    ///
    /// Meant for the start screen, but valid from any phase.
    pub fn begin(&mut self) {
        self.session.enter_stage(0);
    }

    /// Record the learner's choice for a question of the current stage.
    pub fn select_answer(
        &mut self,
        question: QuestionId,
        option: &str,
    ) -> Result<Selection, QuizError> {
        let stage = self.active_stage(Operation::SelectAnswer)?;
        let target = stage
            .question(question)
            .ok_or(QuizError::InvalidQuestion {
                stage: stage.id,
                question,
            })?;

        if !target.has_option(option) {
            return Err(QuizError::InvalidOption {
                question,
                option: option.to_string(),
            });
        }

        let selection = if self.session.feedback_revealed {
            if is_stage_complete(stage, &self.session.answers, true) {
                return Ok(Selection::Locked);
            }
            self.session.feedback_revealed = false;
            Selection::Reopened
        } else {
            Selection::Recorded
        };

        self.session.answers.insert(question, option.to_string());
        self.session.status = None;
        Ok(selection)
    }

    /// Evaluate the current stage and reveal feedback if every question is answered.
    ///
    /// Idempotent: repeating it with the same answers yields the same outcome.
    pub fn check_answers(&mut self) -> Result<CheckOutcome, QuizError> {
        let stage = self.active_stage(Operation::CheckAnswers)?;
        let evaluation = StageEvaluation::evaluate(stage, &self.session.answers);

        if !evaluation.all_answered() {
            self.session.status = Some(StatusMessage::Incomplete);
            return Ok(CheckOutcome::Incomplete {
                missing: evaluation.missing(),
            });
        }

        self.session.feedback_revealed = true;

        if evaluation.all_correct() {
            self.session.status = None;
            Ok(CheckOutcome::Passed)
        } else {
            self.session.status = Some(StatusMessage::IncorrectAnswers);
            Ok(CheckOutcome::Incorrect {
                wrong: evaluation.wrong(),
            })
        }
    }

    /// Leave a complete stage: move to the next one, or finish after the last.
    pub fn advance(&mut self) -> Result<Advanced, QuizError> {
        self.active_stage(Operation::Advance)?;

        if !self.is_stage_complete() {
            return Err(QuizError::IllegalTransition {
                operation: Operation::Advance,
                reason: "the current stage is not complete",
            });
        }

        let index = self.session.stage_index;
        if self.catalog.is_last(index) {
            self.session.finish();
            Ok(Advanced::Finished)
        } else {
            let next = index.saturating_add(1);
            self.session.enter_stage(next);
            Ok(Advanced::NextStage(next))
        }
    }

    /// Return to the start screen, discarding all progress.
    pub fn reset(&mut self) {
        self.session = Session::new();
    }

    /// Derive the view model for the current state. Never mutates.
    #[must_use]
    pub fn current_view(&self) -> ViewModel<'_> {
        ViewModel::derive(self.catalog, &self.session)
    }

    fn active_stage(&self, operation: Operation) -> Result<&'c Stage, QuizError> {
        if self.session.phase != Phase::InProgress {
            return Err(QuizError::IllegalTransition {
                operation,
                reason: "no stage is in progress",
            });
        }
        self.catalog
            .get(self.session.stage_index)
            .ok_or(QuizError::IllegalTransition {
                operation,
                reason: "the stage index is outside the catalog",
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogInfo, Content, Question, StageId};

    fn catalog() -> StageCatalog {
        let stage = |id: u32, qid: u32| {
            Stage::new(
                StageId(id),
                format!("Stage {id}"),
                Content::new("notes"),
                vec![Question::new(
                    QuestionId(qid),
                    "Pick yes",
                    vec!["yes".into(), "no".into()],
                    "yes",
                )],
            )
        };
        StageCatalog::new(CatalogInfo::default(), vec![stage(1, 1), stage(2, 2)])
            .expect("valid catalog")
    }

    #[test]
    fn operations_outside_a_stage_are_refused() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);

        assert!(matches!(
            controller.select_answer(QuestionId(1), "yes"),
            Err(QuizError::IllegalTransition {
                operation: Operation::SelectAnswer,
                ..
            })
        ));
        assert!(controller.check_answers().is_err());
        assert!(controller.advance().is_err());
        assert_eq!(controller.session(), &Session::new());
    }

    #[test]
    fn question_of_another_stage_is_invalid() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);
        controller.begin();

        let err = controller.select_answer(QuestionId(2), "yes");
        assert_eq!(
            err,
            Err(QuizError::InvalidQuestion {
                stage: StageId(1),
                question: QuestionId(2),
            })
        );
        assert!(controller.session().answers().is_empty());
    }

    #[test]
    fn unknown_option_is_invalid() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);
        controller.begin();

        let err = controller.select_answer(QuestionId(1), "maybe");
        assert!(matches!(err, Err(QuizError::InvalidOption { .. })));
        assert!(controller.session().answers().is_empty());
    }

    #[test]
    fn selection_clears_status() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);
        controller.begin();

        let outcome = controller.check_answers().expect("check");
        assert_eq!(outcome, CheckOutcome::Incomplete { missing: 1 });
        assert_eq!(controller.session().status(), Some(StatusMessage::Incomplete));

        controller.select_answer(QuestionId(1), "no").expect("select");
        assert_eq!(controller.session().status(), None);
    }

    #[test]
    fn incorrect_stage_reopens_on_selection() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);
        controller.begin();

        controller.select_answer(QuestionId(1), "no").expect("select");
        assert_eq!(
            controller.check_answers(),
            Ok(CheckOutcome::Incorrect { wrong: 1 })
        );
        assert!(controller.session().feedback_revealed());

        assert_eq!(
            controller.select_answer(QuestionId(1), "yes"),
            Ok(Selection::Reopened)
        );
        assert!(!controller.session().feedback_revealed());
        assert_eq!(controller.session().status(), None);
        assert_eq!(controller.session().answer(QuestionId(1)), Some("yes"));
    }

    #[test]
    fn complete_stage_is_locked() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);
        controller.begin();

        controller.select_answer(QuestionId(1), "yes").expect("select");
        assert_eq!(controller.check_answers(), Ok(CheckOutcome::Passed));

        assert_eq!(
            controller.select_answer(QuestionId(1), "no"),
            Ok(Selection::Locked)
        );
        assert_eq!(controller.session().answer(QuestionId(1)), Some("yes"));
        assert!(controller.is_stage_complete());
    }

    #[test]
    fn advance_before_completion_is_refused() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);
        controller.begin();
        controller.select_answer(QuestionId(1), "yes").expect("select");

        let before = controller.session().clone();
        assert!(matches!(
            controller.advance(),
            Err(QuizError::IllegalTransition {
                operation: Operation::Advance,
                ..
            })
        ));
        assert_eq!(controller.session(), &before);
    }

    #[test]
    fn begin_restarts_from_any_phase() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);
        controller.begin();
        controller.select_answer(QuestionId(1), "yes").expect("select");
        controller.check_answers().expect("check");
        controller.advance().expect("advance");

        controller.begin();
        assert_eq!(controller.session().current_stage_index(), Some(0));
        assert!(controller.session().answers().is_empty());
    }

    #[test]
    fn reset_returns_to_start() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);
        controller.begin();
        controller.select_answer(QuestionId(1), "no").expect("select");
        controller.reset();
        assert_eq!(controller.session(), &Session::new());
        assert!(controller.current_stage().is_none());
    }
}
