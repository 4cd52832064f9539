//! # Stagegate CLI Module
//!
//! ## Available Commands
//!
//! - `play` - Play the catalog interactively (default)
//! - `stages` - List the stages of the catalog
//! - `validate` - Check a catalog file without playing it

mod commands;

use crate::config::{Overrides, Settings};
use crate::error::AppError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Stagegate - stage-gated study quizzes
///
/// Work through a catalog of study stages. Each stage unlocks only after
/// every one of its questions is answered correctly.
#[derive(Parser, Debug)]
#[command(name = "stagegate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Catalog file (TOML); the built-in catalog is used when absent
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for option shuffling
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Keep answer options in catalog order
    #[arg(long, global = true)]
    pub no_shuffle: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play the catalog interactively
    Play,

    /// List the stages of the catalog
    Stages,

    /// Validate a catalog file
    Validate {
        /// Path to the catalog file
        #[arg(short, long)]
        file: PathBuf,
    },
}

impl Cli {
    /// Settings the command line overrides.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            catalog: self.catalog.clone(),
            seed: self.seed,
            no_shuffle: self.no_shuffle,
        }
    }

    /// Resolve settings from flags, environment and config file.
    pub fn settings(&self) -> Result<Settings, AppError> {
        Settings::from_env(&self.overrides())
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and resolved settings.
pub fn execute(cli: Cli, settings: &Settings) -> Result<(), AppError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Play) | None => cmd_play(settings, json_mode),
        Some(Commands::Stages) => cmd_stages(settings, json_mode),
        Some(Commands::Validate { file }) => cmd_validate(&file, json_mode),
    }
}

// =============================================================================
// TESTS
// =============================================================================
