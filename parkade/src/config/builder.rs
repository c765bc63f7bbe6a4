//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from defaults, the configuration file, the
/// environment and programmatic overrides, in increasing precedence.
///
/// The built configuration has every defaulted field filled in.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads the default data directory and the
    /// process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `config.yaml` from `data_dir` instead of the default data
    /// directory.
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(data_dir.as_ref().to_path_buf());
        self
    }

    /// Ignores the configuration file.
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `PARKADE_*` environment variables.
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Adds a programmatic layer above every other source. Later calls take
    /// precedence over earlier ones.
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Assembles and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed,
    /// an environment variable is malformed, or the result fails
    /// validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::config::{Config, ConfigBuilder};
    ///
    /// let config = ConfigBuilder::new()
    ///     .skip_files()
    ///     .skip_env()
    ///     .with_config(Config { max_window_minutes: Some(180), ..Default::default() })
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(config.max_window_minutes(), Some(180));
    /// assert_eq!(config.maximum_lock_wait_seconds, Some(5));
    /// ```
    pub fn build(self) -> Result<Config> {
        let mut config = Config::defaults();

        if !self.skip_files {
            if let Some(source) = ConfigLoader::load_user_config(self.data_dir.as_deref())? {
                ConfigValidator::validate(&source.config)?;
                ConfigMerger::merge_into(&mut config, &source.config);
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for layer in &self.overrides {
            ConfigMerger::merge_into(&mut config, layer);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
