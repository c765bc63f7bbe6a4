//! Configuration merging and precedence handling.

use crate::config::schema::Config;

/// Merges configuration layers.
///
/// # Examples
///
/// ```
/// use parkade::config::{Config, ConfigMerger};
///
/// let low = Config { default_window_minutes: Some(30), ..Default::default() };
/// let high = Config { default_window_minutes: Some(90), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.default_window_minutes, Some(90));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges layers given from lowest to highest precedence.
    #[must_use]
    pub fn merge<'a>(layers: impl IntoIterator<Item = &'a Config>) -> Config {
        let mut result = Config::default();
        for layer in layers {
            Self::merge_into(&mut result, layer);
        }
        result
    }

    /// Merges `source` into `target`. Every field set in `source` replaces
    /// the one in `target`; unset fields leave `target` alone.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.default_window_minutes.is_some() {
            target.default_window_minutes = source.default_window_minutes;
        }

        if source.max_window_minutes.is_some() {
            target.max_window_minutes = source.max_window_minutes;
        }

        if source.enforce_operating_hours.is_some() {
            target.enforce_operating_hours = source.enforce_operating_hours;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputFormat;

    #[test]
    fn test_merge_overwrites() {
        let mut target = Config {
            max_window_minutes: Some(60),
            ..Default::default()
        };
        let source = Config {
            max_window_minutes: Some(120),
            disable_autoinit: Some(true),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.max_window_minutes, Some(120));
        assert_eq!(target.disable_autoinit, Some(true));
    }

    #[test]
    fn test_merge_none_values_dont_overwrite() {
        let mut target = Config {
            output_format: Some(OutputFormat::Csv),
            enforce_operating_hours: Some(true),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.output_format, Some(OutputFormat::Csv));
        assert_eq!(target.enforce_operating_hours, Some(true));
    }

    #[test]
    fn test_merge_layers_in_order() {
        let defaults = Config::defaults();
        let file = Config {
            maximum_lock_wait_seconds: Some(10),
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        };
        let env = Config {
            maximum_lock_wait_seconds: Some(2),
            ..Default::default()
        };

        let merged = ConfigMerger::merge([&defaults, &file, &env]);
        assert_eq!(merged.maximum_lock_wait_seconds, Some(2));
        assert_eq!(merged.output_format, Some(OutputFormat::Json));
        assert_eq!(merged.default_window_minutes, Some(60));
    }
}
