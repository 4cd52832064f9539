//! # Catalog Files
//!
//! Loading stage catalogs from TOML documents.
//!
//! ```toml
//! title = "..."
//! intro = "..."
//! outro = "..."
//!
//! [[stages]]
//! id = 1
//! title = "..."
//! theme = "purple"
//! icon = "book"
//! content = """..."""
//!
//! [[stages.questions]]
//! id = 1
//! prompt = "..."
//! options = ["...", "..."]
//! correct_answer = "..."
//! ```
//!
//! The built-in catalog is embedded in the binary and used whenever no
//! catalog path is configured.

use crate::error::AppError;
use serde::Deserialize;
use stagegate_core::{CatalogInfo, Stage, StageCatalog};
use std::path::{Path, PathBuf};

/// Maximum catalog file size (4 MB).
///
/// Catalogs are hand-written study material; anything larger is a mistake.
pub const MAX_CATALOG_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// TOML source of the built-in catalog.
pub const BUILTIN_CATALOG: &str = include_str!("../catalogs/frankenstein.toml");

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The catalog embedded in the binary.
    Builtin,
    /// A TOML file on disk.
    File(PathBuf),
}

impl CatalogSource {
    /// Source for an optional configured path.
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(CatalogSource::Builtin, CatalogSource::File)
    }

    /// Load and validate the catalog.
    pub fn load(&self) -> Result<StageCatalog, AppError> {
        match self {
            CatalogSource::Builtin => parse_catalog(BUILTIN_CATALOG, Path::new("<builtin>")),
            CatalogSource::File(path) => load_catalog(path),
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Builtin => f.write_str("built-in catalog"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    title: String,
    #[serde(default)]
    intro: String,
    #[serde(default)]
    outro: String,
    stages: Vec<Stage>,
}

/// Parse and validate a catalog from TOML text.
///
/// `origin` is only used in error messages.
pub fn parse_catalog(source: &str, origin: &Path) -> Result<StageCatalog, AppError> {
    let document: CatalogDocument = toml::from_str(source).map_err(|e| AppError::Toml {
        path: origin.to_path_buf(),
        source: e,
    })?;

    let info = CatalogInfo::new(document.title, document.intro, document.outro);
    Ok(StageCatalog::new(info, document.stages)?)
}

/// Read, parse and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<StageCatalog, AppError> {
    let read_error = |source| AppError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(read_error)?;
    if metadata.len() > MAX_CATALOG_FILE_SIZE {
        return Err(AppError::CatalogTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_CATALOG_FILE_SIZE,
        });
    }

    let source = std::fs::read_to_string(path).map_err(read_error)?;
    parse_catalog(&source, path)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stagegate_core::{CatalogError, StageIcon, StageId};

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = CatalogSource::Builtin.load().expect("builtin catalog");
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.question_count(), 10);
        assert_eq!(catalog.info().title, "Escape Frankenstein's Lab");

        let sizes: Vec<_> = catalog.iter().map(|s| s.questions.len()).collect();
        assert_eq!(sizes, vec![3, 2, 3, 2]);

        let icons: Vec<_> = catalog.iter().map(|s| s.icon).collect();
        assert_eq!(
            icons,
            vec![StageIcon::Book, StageIcon::Brain, StageIcon::Flask, StageIcon::Eye]
        );
    }

    #[test]
    fn builtin_content_keeps_paragraphs() {
        let catalog = CatalogSource::Builtin.load().expect("builtin catalog");
        let stage = catalog.stage(StageId(1)).expect("stage 1");
        assert!(stage.content.as_str().starts_with("I. Context"));
        assert!(stage.content.as_str().contains("\n\nWriting as Therapy"));
    }

    #[test]
    fn minimal_document_parses() {
        let source = r#"
            title = "Mini"

            [[stages]]
            id = 1
            title = "Only"

            [[stages.questions]]
            id = 1
            prompt = "Yes?"
            options = ["yes", "no"]
            correct_answer = "yes"
        "#;
        let catalog = parse_catalog(source, Path::new("mini.toml")).expect("parse");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.info().intro, "");
        assert_eq!(catalog.get(0).map(|s| s.icon), Some(StageIcon::Book));
    }

    #[test]
    fn structural_errors_surface_as_catalog_errors() {
        let source = r#"
            title = "Broken"

            [[stages]]
            id = 2
            title = "Wrong id"

            [[stages.questions]]
            id = 1
            prompt = "Yes?"
            options = ["yes", "no"]
            correct_answer = "yes"
        "#;
        let err = parse_catalog(source, Path::new("broken.toml")).expect_err("invalid");
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::NonContiguousStageId { .. })
        ));
    }

    #[test]
    fn unknown_top_level_keys_are_rejected() {
        let source = r#"
            title = "Typo"
            stagez = []
            stages = []
        "#;
        let err = parse_catalog(source, Path::new("typo.toml")).expect_err("invalid");
        assert!(matches!(err, AppError::Toml { .. }));
        assert!(err.to_string().contains("typo.toml"));
    }

    #[test]
    fn misspelled_stage_and_question_keys_are_rejected() {
        let stage_typo = r#"
            title = "Typo"

            [[stages]]
            id = 1
            title = "Only"
            icn = "eye"

            [[stages.questions]]
            id = 1
            prompt = "Yes?"
            options = ["yes", "no"]
            correct_answer = "yes"
        "#;
        let err = parse_catalog(stage_typo, Path::new("stage.toml")).expect_err("invalid");
        assert!(matches!(err, AppError::Toml { .. }));
        assert!(err.to_string().contains("icn"));

        let question_typo = stage_typo
            .replace("icn = \"eye\"", "icon = \"eye\"")
            .replace("correct_answer", "correct_anwser");
        let err = parse_catalog(&question_typo, Path::new("question.toml")).expect_err("invalid");
        assert!(matches!(err, AppError::Toml { .. }));
        assert!(err.to_string().contains("correct_anwser"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_catalog(Path::new("/nonexistent/catalog.toml")).expect_err("missing");
        assert!(matches!(err, AppError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/catalog.toml"));
    }
}
