//! Configuration file loading.
//!
//! The only file source is `config.yaml` in the data directory. A missing
//! file is not an error; an unreadable or malformed one is.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::Result;

/// File name of the user configuration inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// A configuration file together with its parsed contents.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path the configuration was read from.
    pub path: PathBuf,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use parkade::config::ConfigLoader;
/// use std::path::Path;
///
/// if let Some(source) = ConfigLoader::load_user_config(Some(Path::new("/tmp/parkade"))).unwrap() {
///     println!("loaded {}", source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `config.yaml` from `data_dir`, or from the default data
    /// directory when `data_dir` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the default data directory cannot be determined.
    pub fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let path = match data_dir {
            Some(dir) => dir.join(CONFIG_FILE_NAME),
            None => crate::database::resolve_data_dir()?.join(CONFIG_FILE_NAME),
        };

        if !path.exists() {
            log::debug!("no configuration file at {}", path.display());
            return Ok(None);
        }

        let config = Self::load_file(&path)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(Some(ConfigSource { path, config }))
    }

    /// Reads and parses one YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read, or
    /// [`crate::Error::Configuration`] if it is not a valid configuration.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parses a YAML configuration document. A document with no content,
    /// such as one holding only comments, is the empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if the YAML is invalid or
    /// names an unknown field.
    pub fn parse(contents: &str) -> Result<Config> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        if value.is_null() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }
}
