//! # Terminal Renderer
//!
//! Paints a [`ViewModel`] as plain text, or as one JSON line per screen for
//! machine-driven front-ends. The renderer only reads the view model; it
//! never touches the session.

use crate::error::AppError;
use stagegate_core::{
    FinishedView, OptionClass, OptionView, QuestionView, StageMarker, StageView, StartView,
    ViewModel,
};
use std::io::Write;

const RULE: &str = "------------------------------------------------------------";

/// Letter shown in front of the option at `index` (`a`, `b`, ...).
#[must_use]
pub fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'a'.checked_add(i))
        .filter(u8::is_ascii_lowercase)
        .map_or('?', char::from)
}

/// 0-based option index for a letter typed by the learner.
#[must_use]
pub fn option_index(label: char) -> Option<usize> {
    let label = label.to_ascii_lowercase();
    label
        .is_ascii_lowercase()
        .then(|| usize::from(label as u8 - b'a'))
}

/// Render a screen as text.
pub fn render_text<W: Write>(view: &ViewModel<'_>, out: &mut W) -> Result<(), AppError> {
    match view {
        ViewModel::Start(start) => render_start(start, out)?,
        ViewModel::Stage(stage) => render_stage(stage, out)?,
        ViewModel::Finished(finished) => render_finished(finished, out)?,
    }
    out.flush()?;
    Ok(())
}

/// Render a screen as a single JSON line.
pub fn render_json<W: Write>(view: &ViewModel<'_>, out: &mut W) -> Result<(), AppError> {
    serde_json::to_writer(&mut *out, view)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Render a one-line notice (refused command, parse problem).
pub fn render_notice<W: Write>(message: &str, json_mode: bool, out: &mut W) -> Result<(), AppError> {
    if json_mode {
        serde_json::to_writer(&mut *out, &serde_json::json!({ "notice": message }))?;
        writeln!(out)?;
    } else {
        writeln!(out, "!! {}", message)?;
    }
    out.flush()?;
    Ok(())
}

fn render_start<W: Write>(start: &StartView<'_>, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", start.title)?;
    writeln!(out, "{}", RULE)?;
    if !start.intro.is_empty() {
        writeln!(out, "{}", start.intro)?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "{} Stages - {} Questions",
        start.stage_count, start.question_count
    )?;
    writeln!(out)?;
    writeln!(out, "Type `start` to begin.")
}

fn render_finished<W: Write>(finished: &FinishedView<'_>, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{} - complete", finished.title)?;
    writeln!(out, "{}", RULE)?;
    if !finished.outro.is_empty() {
        writeln!(out, "{}", finished.outro)?;
        writeln!(out)?;
    }
    writeln!(out, "All {} stages unlocked.", finished.stage_count)?;
    writeln!(out, "Type `reset` to play again or `quit` to leave.")
}

fn render_stage<W: Write>(stage: &StageView<'_>, out: &mut W) -> std::io::Result<()> {
    let markers: Vec<&str> = stage
        .markers
        .iter()
        .map(|marker| match marker {
            StageMarker::Done => "[x]",
            StageMarker::Current => "[>]",
            StageMarker::Locked => "[ ]",
        })
        .collect();

    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Stage {} of {} - {} ({}, {})",
        stage.position + 1,
        stage.stage_count,
        stage.title,
        stage.icon.name(),
        stage.theme
    )?;
    writeln!(out, "{}", markers.join(" "))?;
    writeln!(out, "{}", RULE)?;

    if !stage.content.is_empty() {
        writeln!(out, "Study Notes")?;
        writeln!(out)?;
        writeln!(out, "{}", stage.content)?;
        writeln!(out, "{}", RULE)?;
    }

    for question in &stage.questions {
        render_question(question, out)?;
    }

    if let Some(status) = stage.status_text {
        writeln!(out, "!! {}", status)?;
    }

    let mut actions = Vec::new();
    if stage.inputs_enabled || stage.can_retry {
        actions.push("<question> <letter> to answer");
    }
    if stage.can_check {
        actions.push(if stage.feedback_revealed {
            "`check` to try again"
        } else {
            "`check` to unlock the next stage"
        });
    }
    if stage.can_advance {
        actions.push("`next` to proceed");
    }
    actions.push("`help` for commands");
    writeln!(out, "> {}", actions.join(" | "))
}

fn render_question<W: Write>(question: &QuestionView<'_>, out: &mut W) -> std::io::Result<()> {
    let verdict = match question.correct {
        Some(true) => "  [correct]",
        Some(false) => "  [!]",
        None => "",
    };
    writeln!(out, "Question {}{}", question.number, verdict)?;
    writeln!(out, "  {}", question.prompt)?;
    for (index, option) in question.options.iter().enumerate() {
        writeln!(out, "    {}) {}{}", option_label(index), option.text, option_note(option))?;
    }
    writeln!(out)
}

fn option_note(option: &OptionView<'_>) -> &'static str {
    match (option.class, option.selected) {
        (Some(OptionClass::Correct), true) => "   <- your answer, correct",
        (Some(OptionClass::Correct), false) => "   <- correct answer",
        (Some(OptionClass::IncorrectlySelected), _) => "   <- your answer, incorrect",
        (Some(OptionClass::Unselected), _) => "",
        (None, true) => "   <- selected",
        (None, false) => "",
    }
}

// =============================================================================
// TESTS
// =============================================================================
