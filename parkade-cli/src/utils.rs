//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, database
//! management and argument parsing.

use crate::error::CliError;
use chrono::{NaiveDate, NaiveTime};
use parkade::database::{default_data_dir, DATABASE_FILE_NAME};
use parkade::window::parse_time;
use parkade::{Amount, Config, ConfigBuilder, Database, DatabaseConfig, OutputFormat};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the maximum lock wait (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir` / `PARKADE_DATA_DIR`, then
/// `~/.parkade`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. `<data_dir>/config.yaml`
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let overrides = Config {
        maximum_lock_wait_seconds: global.busy_timeout,
        disable_autoinit: global.disable_autoinit.then_some(true),
        ..Config::default()
    };

    ConfigBuilder::new()
        .with_data_dir(resolve_data_dir(global)?)
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database with the configured lock wait.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && config.disable_autoinit() {
        return Err(CliError::NoDataDirectory);
    }

    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(config.maximum_lock_wait());
    Database::open(db_config).map_err(CliError::from)
}

/// The `--format` flag if given, otherwise the configured format.
pub fn output_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or_else(|| config.output_format())
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{s}' is not a date (expected YYYY-MM-DD)"))
}

/// Parse an `HH:MM` time argument.
pub fn parse_time_arg(s: &str) -> Result<NaiveTime, String> {
    parse_time(s).map_err(|e| e.to_string())
}

/// Parse a money argument such as `20` or `35.50`.
pub fn parse_amount(s: &str) -> Result<Amount, String> {
    s.parse::<Amount>().map_err(|e| e.to_string())
}
