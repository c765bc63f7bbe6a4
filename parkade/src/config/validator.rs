//! Configuration validation.

use crate::config::schema::{Config, MINUTES_PER_DAY};
use crate::error::{Error, Result};

/// Validates a configuration.
///
/// # Examples
///
/// ```
/// use parkade::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { default_window_minutes: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Checks every field that is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "must be greater than 0".into(),
            });
        }

        if let Some(minutes) = config.default_window_minutes {
            Self::validate_minutes("default_window_minutes", minutes)?;
        }

        if let Some(minutes) = config.max_window_minutes {
            Self::validate_minutes("max_window_minutes", minutes)?;
        }

        if let (Some(default), Some(max)) =
            (config.default_window_minutes, config.max_window_minutes)
        {
            if default > max {
                return Err(Error::Validation {
                    field: "default_window_minutes".into(),
                    message: format!("{default} exceeds max_window_minutes {max}"),
                });
            }
        }

        Ok(())
    }

    fn validate_minutes(field: &str, minutes: u32) -> Result<()> {
        if minutes == 0 || minutes > MINUTES_PER_DAY {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("{minutes} is outside 1..={MINUTES_PER_DAY}"),
            });
        }
        Ok(())
    }
}
