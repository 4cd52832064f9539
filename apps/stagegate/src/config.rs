//! # Configuration
//!
//! Settings come from four layers, highest precedence first:
//!
//! 1. CLI flags
//! 2. Environment (`STAGEGATE_CATALOG`, `STAGEGATE_SEED`, `STAGEGATE_LOG_FORMAT`)
//! 3. Config file (`--config`, else `STAGEGATE_CONFIG`, else `./stagegate.toml` if present)
//! 4. Defaults
//!
//! ```toml
//! catalog = "path/to/catalog.toml"
//! shuffle = true
//! seed = 42
//! log_format = "text"
//! ```

use crate::error::AppError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file picked up from the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "stagegate.toml";

/// Environment variable naming the config file.
pub const ENV_CONFIG: &str = "STAGEGATE_CONFIG";
/// Environment variable naming the catalog file.
pub const ENV_CATALOG: &str = "STAGEGATE_CATALOG";
/// Environment variable holding the shuffle seed.
pub const ENV_SEED: &str = "STAGEGATE_SEED";
/// Environment variable selecting the log format.
pub const ENV_LOG_FORMAT: &str = "STAGEGATE_LOG_FORMAT";

// =============================================================================
// LOG FORMAT
// =============================================================================

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "unknown log format {other:?} (expected \"text\" or \"json\")"
            ))),
        }
    }
}

// =============================================================================
// CONFIG FILE
// =============================================================================

/// Contents of a config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub catalog: Option<PathBuf>,
    pub shuffle: Option<bool>,
    pub seed: Option<u64>,
    pub log_format: Option<LogFormat>,
}

impl ConfigFile {
    /// Read and parse a config file.
    ///
    /// A relative `catalog` path is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let source = std::fs::read_to_string(path).map_err(|e| AppError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config: ConfigFile = toml::from_str(&source).map_err(|e| AppError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;

        if let (Some(catalog), Some(dir)) = (config.catalog.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }

        Ok(config)
    }
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub seed: Option<u64>,
    pub no_shuffle: bool,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Catalog file; `None` selects the built-in catalog.
    pub catalog: Option<PathBuf>,
    /// Shuffle answer options at load time.
    pub shuffle: bool,
    /// Shuffle seed; `None` draws a fresh one.
    pub seed: Option<u64>,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            shuffle: true,
            seed: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env(overrides: &Overrides) -> Result<Self, AppError> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an explicit environment lookup.
    pub fn resolve<F>(overrides: &Overrides, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match config_path(overrides, &env) {
            Some(path) => ConfigFile::load(&path)?,
            None => ConfigFile::default(),
        };

        let env_seed = env(ENV_SEED)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| {
                    AppError::Config(format!("{ENV_SEED} must be an unsigned integer, got {raw:?}"))
                })
            })
            .transpose()?;
        let env_log_format = env(ENV_LOG_FORMAT)
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()?;

        let defaults = Settings::default();
        Ok(Settings {
            catalog: overrides
                .catalog
                .clone()
                .or_else(|| env(ENV_CATALOG).map(PathBuf::from))
                .or(file.catalog),
            shuffle: !overrides.no_shuffle && file.shuffle.unwrap_or(defaults.shuffle),
            seed: overrides.seed.or(env_seed).or(file.seed),
            log_format: env_log_format
                .or(file.log_format)
                .unwrap_or(defaults.log_format),
        })
    }
}

fn config_path<F>(overrides: &Overrides, env: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    overrides
        .config
        .clone()
        .or_else(|| env(ENV_CONFIG).map(PathBuf::from))
        .or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        })
}

// =============================================================================
// TESTS
// =============================================================================
