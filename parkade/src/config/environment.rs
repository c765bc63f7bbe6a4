//! Environment variable handling for configuration overrides.
//!
//! Each setting `name` can be overridden by `PARKADE_<NAME>`. Environment
//! values take precedence over the configuration file.

use std::env;
use std::str::FromStr;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Override for `maximum_lock_wait_seconds`.
pub const ENV_MAXIMUM_LOCK_WAIT_SECONDS: &str = "PARKADE_MAXIMUM_LOCK_WAIT_SECONDS";
/// Override for `default_window_minutes`.
pub const ENV_DEFAULT_WINDOW_MINUTES: &str = "PARKADE_DEFAULT_WINDOW_MINUTES";
/// Override for `max_window_minutes`.
pub const ENV_MAX_WINDOW_MINUTES: &str = "PARKADE_MAX_WINDOW_MINUTES";
/// Override for `enforce_operating_hours`.
pub const ENV_ENFORCE_OPERATING_HOURS: &str = "PARKADE_ENFORCE_OPERATING_HOURS";
/// Override for `disable_autoinit`.
pub const ENV_DISABLE_AUTOINIT: &str = "PARKADE_DISABLE_AUTOINIT";
/// Override for `output_format`.
pub const ENV_OUTPUT_FORMAT: &str = "PARKADE_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use parkade::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies the `PARKADE_*` variables of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the variable if a value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        Self::apply_from(config, |name| env::var(name).ok())
    }

    /// Applies overrides read through `lookup` instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// As [`EnvironmentConfig::apply_overrides`].
    pub fn apply_from(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(val) = lookup(ENV_MAXIMUM_LOCK_WAIT_SECONDS) {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number(ENV_MAXIMUM_LOCK_WAIT_SECONDS, &val)?);
        }

        if let Some(val) = lookup(ENV_DEFAULT_WINDOW_MINUTES) {
            config.default_window_minutes =
                Some(Self::parse_number(ENV_DEFAULT_WINDOW_MINUTES, &val)?);
        }

        if let Some(val) = lookup(ENV_MAX_WINDOW_MINUTES) {
            config.max_window_minutes = Some(Self::parse_number(ENV_MAX_WINDOW_MINUTES, &val)?);
        }

        if let Some(val) = lookup(ENV_ENFORCE_OPERATING_HOURS) {
            config.enforce_operating_hours =
                Some(Self::parse_bool(ENV_ENFORCE_OPERATING_HOURS, &val)?);
        }

        if let Some(val) = lookup(ENV_DISABLE_AUTOINIT) {
            config.disable_autoinit = Some(Self::parse_bool(ENV_DISABLE_AUTOINIT, &val)?);
        }

        if let Some(val) = lookup(ENV_OUTPUT_FORMAT) {
            config.output_format =
                Some(
                    OutputFormat::from_str(&val).map_err(|message| Error::Validation {
                        field: ENV_OUTPUT_FORMAT.into(),
                        message,
                    })?,
                );
        }

        Ok(())
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("'{s}' is not a non-negative integer"),
        })
    }

    /// Accepts true/1/yes/on and false/0/no/off, ignoring case.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("invalid boolean '{s}' (expected true/false/1/0/yes/no/on/off)"),
            }),
        }
    }
}
