//! Library exports for parkade-cli.
//!
//! This module exports the CLI structure for use by documentation tooling
//! and tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

pub use cli::Cli;
