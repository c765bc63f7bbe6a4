//! Configuration schema definitions.
//!
//! Every field is optional so that partial files and environment overrides
//! can be layered. The accessors on [`Config`] return the effective value
//! with the built-in default applied.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default lock wait, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Default window length when only a start time is given, in minutes.
pub const DEFAULT_WINDOW_MINUTES: u32 = 60;

/// Longest window any setting may describe, in minutes.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use parkade::config::{Config, OutputFormat};
///
/// let config = Config {
///     max_window_minutes: Some(240),
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.max_window_minutes(), Some(240));
/// assert_eq!(config.default_window_minutes(), 60);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Seconds a writer waits for the database lock.
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Window length used when a request gives no end time.
    pub default_window_minutes: Option<u32>,

    /// Longest window that can be reserved.
    pub max_window_minutes: Option<u32>,

    /// Reject windows outside a lot's operating hours.
    pub enforce_operating_hours: Option<bool>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for listings.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// The built-in defaults, with every defaulted field filled in.
    #[must_use]
    pub const fn defaults() -> Self {
        Self {
            maximum_lock_wait_seconds: Some(DEFAULT_LOCK_WAIT_SECONDS),
            default_window_minutes: Some(DEFAULT_WINDOW_MINUTES),
            max_window_minutes: None,
            enforce_operating_hours: Some(false),
            disable_autoinit: Some(false),
            output_format: Some(OutputFormat::Table),
        }
    }

    /// Effective lock wait.
    #[must_use]
    pub fn maximum_lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Effective default window length in minutes.
    #[must_use]
    pub fn default_window_minutes(&self) -> u32 {
        self.default_window_minutes.unwrap_or(DEFAULT_WINDOW_MINUTES)
    }

    /// Effective window limit in minutes, if any.
    #[must_use]
    pub const fn max_window_minutes(&self) -> Option<u32> {
        self.max_window_minutes
    }

    /// Whether operating hours are enforced.
    #[must_use]
    pub fn enforce_operating_hours(&self) -> bool {
        self.enforce_operating_hours.unwrap_or(false)
    }

    /// Whether automatic initialization is disabled.
    #[must_use]
    pub fn disable_autoinit(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }

    /// Effective output format.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for listings.
///
/// # Examples
///
/// ```
/// use parkade::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable aligned table.
    #[default]
    Table,
    /// JSON document.
    Json,
    /// CSV with a header row.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "unknown output format '{other}', expected table, json or csv"
            )),
        }
    }
}
