//! Shared error type for the application crate.

use stagegate_core::{CatalogError, QuizError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors emitted by the binary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("catalog file {} is {size} bytes, maximum is {limit} bytes", .path.display())]
    CatalogTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
