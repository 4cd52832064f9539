//! # Stagegate - stage-gated study quizzes
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 apps/stagegate (THE BINARY)          │
//! │                                                      │
//! │  ┌───────────┐   ┌────────────┐   ┌──────────────┐  │
//! │  │   CLI     │   │  Config    │   │  Play loop   │  │
//! │  │  (clap)   │   │  (toml)    │   │  + renderer  │  │
//! │  └─────┬─────┘   └─────┬──────┘   └──────┬───────┘  │
//! │        └───────────────┼─────────────────┘          │
//! │                        ▼                            │
//! │               ┌─────────────────┐                   │
//! │               │ stagegate-core  │                   │
//! │               │   (THE LOGIC)   │                   │
//! │               └─────────────────┘                   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Play the built-in catalog
//! stagegate
//!
//! # Play a catalog file with a fixed option order
//! stagegate play -c quiz.toml --seed 42
//!
//! # List stages / validate a file
//! stagegate stages --json-mode
//! stagegate validate -f quiz.toml
//! ```

use clap::Parser;
use stagegate::cli;
use stagegate::config::{LogFormat, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("stagegate: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&settings, cli.verbose);

    // The screen owns stdout in JSON mode.
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, &settings) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with rendered screens.
fn init_tracing(settings: &Settings, verbose: bool) {
    let default_filter = if verbose {
        "stagegate=debug"
    } else {
        "stagegate=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match settings.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn print_banner() {
    println!(
        r#"
  ┌─┐┌┬┐┌─┐┌─┐┌─┐┌─┐┌─┐┌┬┐┌─┐
  └─┐ │ ├─┤│ ┬├┤ │ ┬├─┤ │ ├┤
  └─┘ ┴ ┴ ┴└─┘└─┘└─┘┴ ┴ ┴ └─┘

  Stagegate v{}

  Read • Answer • Unlock
"#,
        env!("CARGO_PKG_VERSION")
    );
}
