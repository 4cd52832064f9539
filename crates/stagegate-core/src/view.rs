//! # View Model
//!
//! Read-only projection of `(StageCatalog, Session)` for a rendering layer.
//!
//! Derivation is a pure function: it borrows both inputs, never mutates, and
//! yields an identical value every time it is called on the same state. All
//! view types serialize to JSON so a front-end in another process can paint
//! them.

use crate::grading::{Grade, StageEvaluation, is_stage_complete};
use crate::session::{Phase, Session, StatusMessage};
use crate::{Question, QuestionId, Stage, StageCatalog, StageIcon, StageId};
use serde::Serialize;

// =============================================================================
// VIEW MODEL
// =============================================================================

/// One screen worth of render data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ViewModel<'a> {
    /// Start screen.
    Start(StartView<'a>),
    /// A stage in progress.
    Stage(StageView<'a>),
    /// Completion screen.
    Finished(FinishedView<'a>),
}

impl<'a> ViewModel<'a> {
    /// Derive the view for a session playing `catalog`.
    #[must_use]
    pub fn derive(catalog: &'a StageCatalog, session: &'a Session) -> Self {
        match session.phase() {
            Phase::NotStarted => ViewModel::Start(StartView::derive(catalog)),
            Phase::Finished => ViewModel::Finished(FinishedView::derive(catalog)),
            Phase::InProgress => match catalog.get(session.stage_index) {
                Some(stage) => ViewModel::Stage(StageView::derive(catalog, stage, session)),
                // Unreachable through the controller; the start screen is the safe fallback.
                None => ViewModel::Start(StartView::derive(catalog)),
            },
        }
    }

    /// Phase this screen belongs to.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            ViewModel::Start(_) => Phase::NotStarted,
            ViewModel::Stage(_) => Phase::InProgress,
            ViewModel::Finished(_) => Phase::Finished,
        }
    }

    /// The stage screen, if this is one.
    #[must_use]
    pub fn as_stage(&self) -> Option<&StageView<'a>> {
        match self {
            ViewModel::Stage(stage) => Some(stage),
            _ => None,
        }
    }
}

// =============================================================================
// START / FINISHED
// =============================================================================

/// Start screen data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartView<'a> {
    pub title: &'a str,
    pub intro: &'a str,
    pub stage_count: usize,
    pub question_count: usize,
}

impl<'a> StartView<'a> {
    fn derive(catalog: &'a StageCatalog) -> Self {
        Self {
            title: &catalog.info().title,
            intro: &catalog.info().intro,
            stage_count: catalog.len(),
            question_count: catalog.question_count(),
        }
    }
}

/// Completion screen data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinishedView<'a> {
    pub title: &'a str,
    pub outro: &'a str,
    pub stage_count: usize,
}

impl<'a> FinishedView<'a> {
    fn derive(catalog: &'a StageCatalog) -> Self {
        Self {
            title: &catalog.info().title,
            outro: &catalog.info().outro,
            stage_count: catalog.len(),
        }
    }
}

// =============================================================================
// STAGE
// =============================================================================

/// Progress marker for one stage of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageMarker {
    Done,
    Current,
    Locked,
}

/// How an option is painted once feedback is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionClass {
    /// The correct option, selected or not.
    Correct,
    /// A selected wrong option.
    IncorrectlySelected,
    /// Any other option.
    Unselected,
}

/// One answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView<'a> {
    pub text: &'a str,
    pub selected: bool,
    /// Present only while feedback is revealed.
    pub class: Option<OptionClass>,
}

/// One question with the learner's selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView<'a> {
    pub id: QuestionId,
    /// 1-based position within the stage.
    pub number: usize,
    pub prompt: &'a str,
    pub selected: Option<&'a str>,
    /// Present only while feedback is revealed.
    pub correct: Option<bool>,
    pub options: Vec<OptionView<'a>>,
}

/// A stage in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageView<'a> {
    pub stage_id: StageId,
    pub title: &'a str,
    pub theme: &'a str,
    pub icon: StageIcon,
    pub content: &'a str,
    /// 0-based position in the catalog.
    pub position: usize,
    pub stage_count: usize,
    pub markers: Vec<StageMarker>,
    pub questions: Vec<QuestionView<'a>>,
    pub feedback_revealed: bool,
    /// Answer controls accept input (feedback hidden).
    pub inputs_enabled: bool,
    /// Feedback shows wrong answers; selecting an option reopens the stage.
    pub can_retry: bool,
    /// Every question answered and the stage not yet complete.
    pub can_check: bool,
    /// The stage-complete predicate.
    pub can_advance: bool,
    pub status: Option<StatusMessage>,
    pub status_text: Option<&'static str>,
}

impl<'a> StageView<'a> {
    fn derive(catalog: &'a StageCatalog, stage: &'a Stage, session: &'a Session) -> Self {
        let position = session.stage_index;
        let revealed = session.feedback_revealed();
        let evaluation = StageEvaluation::evaluate(stage, session.answers());
        let complete = is_stage_complete(stage, session.answers(), revealed);

        let markers = (0..catalog.len())
            .map(|index| match index.cmp(&position) {
                std::cmp::Ordering::Less => StageMarker::Done,
                std::cmp::Ordering::Equal => StageMarker::Current,
                std::cmp::Ordering::Greater => StageMarker::Locked,
            })
            .collect();

        let questions = stage
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                question_view(index, question, session, &evaluation, revealed)
            })
            .collect();

        Self {
            stage_id: stage.id,
            title: &stage.title,
            theme: stage.theme.as_str(),
            icon: stage.icon,
            content: stage.content.as_str(),
            position,
            stage_count: catalog.len(),
            markers,
            questions,
            feedback_revealed: revealed,
            inputs_enabled: !revealed,
            can_retry: revealed && !complete,
            can_check: evaluation.all_answered() && !complete,
            can_advance: complete,
            status: session.status(),
            status_text: session.status().map(|status| status.text()),
        }
    }

    /// Find a question by its 1-based number.
    #[must_use]
    pub fn question_by_number(&self, number: usize) -> Option<&QuestionView<'a>> {
        number
            .checked_sub(1)
            .and_then(|index| self.questions.get(index))
    }
}

fn question_view<'a>(
    index: usize,
    question: &'a Question,
    session: &'a Session,
    evaluation: &StageEvaluation,
    revealed: bool,
) -> QuestionView<'a> {
    let selected = session.answer(question.id);

    let options = question
        .options
        .iter()
        .map(|option| {
            let is_selected = selected == Some(option.as_str());
            let class = revealed.then(|| {
                if question.is_correct(option) {
                    OptionClass::Correct
                } else if is_selected {
                    OptionClass::IncorrectlySelected
                } else {
                    OptionClass::Unselected
                }
            });
            OptionView {
                text: option,
                selected: is_selected,
                class,
            }
        })
        .collect();

    QuestionView {
        id: question.id,
        number: index.saturating_add(1),
        prompt: &question.prompt,
        selected,
        correct: revealed.then(|| evaluation.grade(question.id) == Some(Grade::Correct)),
        options,
    }
}

// =============================================================================
// TESTS
// =============================================================================
