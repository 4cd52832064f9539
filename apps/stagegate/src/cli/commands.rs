//! # CLI Command Implementations

use crate::catalog::{CatalogSource, load_catalog};
use crate::config::Settings;
use crate::error::AppError;
use crate::play;
use crate::shuffle::{draw_seed, shuffle_options};
use stagegate_core::StageCatalog;
use std::io::Write;
use std::path::Path;

/// Load the configured catalog and apply option shuffling.
pub fn prepare_catalog(settings: &Settings) -> Result<StageCatalog, AppError> {
    let source = CatalogSource::from_option(settings.catalog.clone());
    let catalog = source.load()?;
    tracing::info!(
        source = %source,
        stages = catalog.len(),
        questions = catalog.question_count(),
        "catalog loaded"
    );

    if !settings.shuffle {
        return Ok(catalog);
    }

    let seed = match settings.seed {
        Some(seed) => seed,
        None => {
            let seed = draw_seed();
            tracing::info!(seed, "drew shuffle seed (pass --seed to replay this order)");
            seed
        }
    };
    Ok(shuffle_options(catalog, seed)?)
}

// =============================================================================
// PLAY COMMAND
// =============================================================================

/// Play the catalog on stdin/stdout.
pub fn cmd_play(settings: &Settings, json_mode: bool) -> Result<(), AppError> {
    let catalog = prepare_catalog(settings)?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    let phase = play::run(&catalog, stdin.lock(), &mut stdout, json_mode)?;

    tracing::info!(%phase, "session closed");
    Ok(())
}

// =============================================================================
// STAGES COMMAND
// =============================================================================

/// List the stages of the configured catalog.
pub fn cmd_stages(settings: &Settings, json_mode: bool) -> Result<(), AppError> {
    let catalog = CatalogSource::from_option(settings.catalog.clone()).load()?;
    let mut out = std::io::stdout().lock();
    write_stages(&catalog, json_mode, &mut out)
}

/// Write the stage listing.
pub fn write_stages<W: Write>(
    catalog: &StageCatalog,
    json_mode: bool,
    out: &mut W,
) -> Result<(), AppError> {
    if json_mode {
        let stages: Vec<_> = catalog
            .iter()
            .map(|stage| {
                serde_json::json!({
                    "id": stage.id,
                    "title": stage.title,
                    "theme": stage.theme,
                    "icon": stage.icon,
                    "questions": stage.questions.len(),
                })
            })
            .collect();
        let output = serde_json::json!({
            "title": catalog.info().title,
            "stage_count": catalog.len(),
            "question_count": catalog.question_count(),
            "stages": stages,
        });
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", catalog.info().title)?;
    writeln!(out, "{}", "=".repeat(catalog.info().title.chars().count()))?;
    for stage in catalog {
        writeln!(
            out,
            "{:>3}. {:<40} {:>2} questions  [{} / {}]",
            stage.id,
            stage.title,
            stage.questions.len(),
            stage.icon.name(),
            stage.theme.as_str()
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{} stages, {} questions",
        catalog.len(),
        catalog.question_count()
    )?;
    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Validate a catalog file. Invalid catalogs are reported as errors.
pub fn cmd_validate(file: &Path, json_mode: bool) -> Result<(), AppError> {
    let catalog = load_catalog(file)?;

    if json_mode {
        let output = serde_json::json!({
            "file": file.to_string_lossy(),
            "valid": true,
            "stage_count": catalog.len(),
            "question_count": catalog.question_count(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{}: OK ({} stages, {} questions)",
        file.display(),
        catalog.len(),
        catalog.question_count()
    );
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_settings(shuffle: bool, seed: Option<u64>) -> Settings {
        Settings {
            shuffle,
            seed,
            ..Settings::default()
        }
    }

    #[test]
    fn unshuffled_catalog_matches_source() {
        let prepared = prepare_catalog(&builtin_settings(false, None)).expect("prepare");
        let builtin = CatalogSource::Builtin.load().expect("builtin");
        assert_eq!(prepared, builtin);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let settings = builtin_settings(true, Some(11));
        let first = prepare_catalog(&settings).expect("prepare");
        let second = prepare_catalog(&settings).expect("prepare");
        assert_eq!(first, second);
    }

    #[test]
    fn stage_listing_text() {
        let catalog = CatalogSource::Builtin.load().expect("builtin");
        let mut out = Vec::new();
        write_stages(&catalog, false, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("Escape Frankenstein's Lab\n"));
        assert!(text.contains("4 stages, 10 questions"));
    }

    #[test]
    fn stage_listing_json() {
        let catalog = CatalogSource::Builtin.load().expect("builtin");
        let mut out = Vec::new();
        write_stages(&catalog, true, &mut out).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value["stage_count"], 4);
        assert_eq!(value["stages"][1]["icon"], "brain");
        assert_eq!(value["stages"][0]["questions"], 3);
    }
}
