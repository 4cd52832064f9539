//! # Interactive Play Loop
//!
//! Reads one command per line, applies it to a [`ProgressionController`]
//! and re-renders the screen.
//!
//! ## Commands
//!
//! | Input        | Effect                                   |
//! |--------------|------------------------------------------|
//! | `start`      | enter the first stage                    |
//! | `<n> <x>`    | choose option `x` for question `n`       |
//! | `check`      | check the answers of the current stage   |
//! | `next`       | go to the next stage (or finish)         |
//! | `reset`      | back to the start screen                 |
//! | `view`       | redraw the current screen                |
//! | `help`       | list the commands                        |
//! | `quit`       | leave                                    |
//!
//! Refused commands never end the loop; they are reported and the loop
//! waits for the next line.

use crate::error::AppError;
use crate::render::{option_index, option_label, render_json, render_notice, render_text};
use stagegate_core::{
    Advanced, CheckOutcome, Operation, Phase, ProgressionController, QuizError, Selection,
    StageCatalog,
};
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

const HELP: &str = "commands: start | <question> <letter> (e.g. `2 b`) | check | next | reset | view | help | quit";

// =============================================================================
// COMMANDS
// =============================================================================

/// One line of learner input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    /// Question number (1-based) and option index (0-based).
    Select { question: usize, option: usize },
    Check,
    Next,
    Reset,
    View,
    Help,
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command {0:?} (type `help`)")]
    Unknown(String),

    #[error("question number must be 1 or higher, got {0:?}")]
    BadQuestion(String),

    #[error("option must be a single letter, got {0:?}")]
    BadOption(String),

    #[error("missing option letter after question {0}")]
    MissingOption(usize),

    #[error("there is no question {number} on this stage (it has {count})")]
    NoSuchQuestion { number: usize, count: usize },
}

/// Why a well-formed command was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Refusal {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "start" | "begin" => Command::Start,
            "check" => Command::Check,
            "next" | "continue" => Command::Next,
            "reset" | "restart" => Command::Reset,
            "view" | "show" => Command::View,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            word if word.starts_with(|c: char| c.is_ascii_digit()) => {
                return parse_selection(word, words.next());
            }
            _ => return Err(CommandError::Unknown(head.to_string())),
        };
        Ok(command)
    }
}

fn parse_selection(number: &str, letter: Option<&str>) -> Result<Command, CommandError> {
    let question = number
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| CommandError::BadQuestion(number.to_string()))?;

    let letter = letter.ok_or(CommandError::MissingOption(question))?;
    let mut chars = letter.chars();
    let option = match (chars.next(), chars.next()) {
        (Some(c), None) => option_index(c),
        _ => None,
    }
    .ok_or_else(|| CommandError::BadOption(letter.to_string()))?;

    Ok(Command::Select { question, option })
}

// =============================================================================
// LOOP
// =============================================================================

/// Play `catalog` until `quit` or end of input. Returns the final phase.
///
/// In JSON mode every screen is one JSON object per line and refusals are
/// `{"notice": ...}` lines.
pub fn run<R, W>(
    catalog: &StageCatalog,
    input: R,
    out: &mut W,
    json_mode: bool,
) -> Result<Phase, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut controller = ProgressionController::new(catalog);
    let render = |controller: &ProgressionController<'_>, out: &mut W| {
        let view = controller.current_view();
        if json_mode {
            render_json(&view, out)
        } else {
            render_text(&view, out)
        }
    };

    render(&controller, out)?;

    for line in input.lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                tracing::debug!(input = %line, error = %e, "unparsed input");
                render_notice(&e.to_string(), json_mode, out)?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                render_notice(HELP, json_mode, out)?;
                continue;
            }
            Command::View => {}
            other => {
                if let Err(e) = apply(&mut controller, other) {
                    tracing::warn!(command = ?other, error = %e, "command refused");
                    render_notice(&e.to_string(), json_mode, out)?;
                    continue;
                }
            }
        }

        render(&controller, out)?;
    }

    let phase = controller.session().phase();
    tracing::debug!(%phase, "play loop ended");
    Ok(phase)
}

/// Apply one state-changing command.
fn apply(controller: &mut ProgressionController<'_>, command: Command) -> Result<(), Refusal> {
    match command {
        Command::Start => {
            controller.begin();
            tracing::debug!(stage = 1, "session started");
        }
        Command::Select { question, option } => select(controller, question, option)?,
        Command::Check => match controller.check_answers()? {
            CheckOutcome::Incomplete { missing } => {
                tracing::debug!(missing, "check refused, stage incomplete");
            }
            CheckOutcome::Incorrect { wrong } => {
                tracing::debug!(wrong, "feedback revealed with wrong answers");
            }
            CheckOutcome::Passed => tracing::info!("stage passed"),
        },
        Command::Next => match controller.advance()? {
            Advanced::NextStage(index) => {
                tracing::info!(stage = index.saturating_add(1), "stage unlocked");
            }
            Advanced::Finished => tracing::info!("all stages complete"),
        },
        Command::Reset => {
            controller.reset();
            tracing::debug!("session reset");
        }
        Command::View | Command::Help | Command::Quit => {}
    }
    Ok(())
}

/// Map a question number and option index onto the current stage.
fn select(
    controller: &mut ProgressionController<'_>,
    number: usize,
    option: usize,
) -> Result<(), Refusal> {
    let stage = controller
        .current_stage()
        .ok_or(QuizError::IllegalTransition {
            operation: Operation::SelectAnswer,
            reason: "no stage is in progress",
        })?;

    let Some(question) = number.checked_sub(1).and_then(|i| stage.questions.get(i)) else {
        return Err(CommandError::NoSuchQuestion {
            number,
            count: stage.questions.len(),
        }
        .into());
    };
    let Some(choice) = question.options.get(option) else {
        return Err(QuizError::InvalidOption {
            question: question.id,
            option: option_label(option).to_string(),
        }
        .into());
    };

    match controller.select_answer(question.id, choice)? {
        Selection::Recorded => {
            tracing::debug!(question = %question.id, answer = %choice, "answer recorded");
        }
        Selection::Reopened => {
            tracing::debug!(question = %question.id, answer = %choice, "feedback hidden for retry");
        }
        Selection::Locked => {
            tracing::debug!(question = %question.id, "stage complete, selection ignored");
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stagegate_core::{CatalogInfo, Content, Question, QuestionId, Stage, StageId};

    fn catalog() -> StageCatalog {
        let stage = |id: u32, question: u32| {
            Stage::new(
                StageId(id),
                format!("Stage {id}"),
                Content::new(""),
                vec![Question::new(
                    QuestionId(question),
                    "Pick right",
                    vec!["wrong".into(), "right".into()],
                    "right",
                )],
            )
        };
        StageCatalog::new(CatalogInfo::default(), vec![stage(1, 1), stage(2, 2)]).expect("valid")
    }

    fn play(script: &str, json_mode: bool) -> (Phase, String) {
        let catalog = catalog();
        let mut out = Vec::new();
        let phase = run(&catalog, script.as_bytes(), &mut out, json_mode).expect("run");
        (phase, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn parses_keywords() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!(" CHECK ".parse::<Command>(), Ok(Command::Check));
        assert_eq!("next".parse::<Command>(), Ok(Command::Next));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn parses_selections() {
        assert_eq!(
            "2 b".parse::<Command>(),
            Ok(Command::Select {
                question: 2,
                option: 1
            })
        );
        assert_eq!("0 a".parse::<Command>(), Err(CommandError::BadQuestion("0".into())));
        assert_eq!("3".parse::<Command>(), Err(CommandError::MissingOption(3)));
        assert_eq!("1 ab".parse::<Command>(), Err(CommandError::BadOption("ab".into())));
    }

    #[test]
    fn full_run_reaches_finished() {
        let (phase, text) = play("start\n1 b\ncheck\nnext\n1 b\ncheck\nnext\n", false);
        assert_eq!(phase, Phase::Finished);
        assert!(text.contains("All 2 stages unlocked."));
    }

    #[test]
    fn refused_commands_keep_the_loop_alive() {
        let (phase, text) = play("next\nstart\nnext\n7 a\n1 z\nquit\n1 b\n", false);
        assert_eq!(phase, Phase::InProgress);
        assert!(text.contains("cannot advance while no stage is in progress"));
        assert!(text.contains("cannot advance while the current stage is not complete"));
        assert!(text.contains("there is no question 7 on this stage (it has 1)"));
        assert!(text.contains("option \"z\""));
    }

    #[test]
    fn out_of_range_question_is_a_command_refusal() {
        let catalog = catalog();
        let mut controller = ProgressionController::new(&catalog);
        controller.begin();

        let refusal = apply(
            &mut controller,
            Command::Select {
                question: 2,
                option: 0,
            },
        );
        assert_eq!(
            refusal,
            Err(Refusal::Command(CommandError::NoSuchQuestion {
                number: 2,
                count: 1
            }))
        );
        assert!(controller.session().answers().is_empty());

        let refusal = apply(
            &mut controller,
            Command::Select {
                question: 1,
                option: 5,
            },
        );
        assert!(matches!(
            refusal,
            Err(Refusal::Quiz(QuizError::InvalidOption { .. }))
        ));
    }

    #[test]
    fn json_mode_emits_one_object_per_line() {
        let (_, text) = play("start\nbogus\n", true);
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["screen"], "start");
        assert_eq!(lines[1]["screen"], "stage");
        assert!(lines[2]["notice"].is_string());
    }
}
