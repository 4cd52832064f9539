//! # Stagegate
//!
//! Terminal front-end for the `stagegate-core` progression engine: catalog
//! files, configuration, option shuffling, rendering and the play loop.
//! The binary in `main.rs` is a thin wrapper around [`cli::execute`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod play;
pub mod render;
pub mod shuffle;

pub use error::AppError;
