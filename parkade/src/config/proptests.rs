//! Property-based tests for configuration layering.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..600),
        prop::option::of(1u32..=1440),
        prop::option::of(1u32..=1440),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(format_strategy()),
    )
        .prop_map(
            |(lock, default_window, max_window, hours, autoinit, format)| Config {
                maximum_lock_wait_seconds: lock,
                default_window_minutes: default_window,
                max_window_minutes: max_window,
                enforce_operating_hours: hours,
                disable_autoinit: autoinit,
                output_format: format,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    // Every field set in the higher layer wins; unset fields fall through.
    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let merged = ConfigMerger::merge([&low, &high]);

        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(
            merged.default_window_minutes,
            high.default_window_minutes.or(low.default_window_minutes)
        );
        prop_assert_eq!(
            merged.max_window_minutes,
            high.max_window_minutes.or(low.max_window_minutes)
        );
        prop_assert_eq!(
            merged.enforce_operating_hours,
            high.enforce_operating_hours.or(low.enforce_operating_hours)
        );
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
    }

    #[test]
    fn merging_is_idempotent(config in config_strategy()) {
        let once = ConfigMerger::merge([&config]);
        let twice = ConfigMerger::merge([&config, &config]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn empty_layer_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // In-range windows are only rejected when the default exceeds the limit.
    #[test]
    fn validation_matches_window_order(config in config_strategy()) {
        let conflicting = matches!(
            (config.default_window_minutes, config.max_window_minutes),
            (Some(default), Some(max)) if default > max
        );
        prop_assert_eq!(ConfigValidator::validate(&config).is_err(), conflicting);
    }
}
