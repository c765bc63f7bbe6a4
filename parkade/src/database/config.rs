//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "parkade.db";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PARKADE_DATA_DIR";

/// Configuration for database connections.
///
/// This struct contains all parameters needed to open and configure
/// a database connection, including the database file path, the lock wait
/// and access modes.
///
/// # Examples
///
/// ```
/// use parkade::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/parkade.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long to wait for the write lock before failing.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5s
    /// - `auto_create`: true
    /// - `read_only`: false
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_secs(5),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Disables creation of a missing database file.
    #[must_use]
    pub const fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/parkade.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.parkade`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".parkade"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "cannot determine home directory".into(),
        })
}

/// Resolves the data directory from `PARKADE_DATA_DIR` or the default.
///
/// # Errors
///
/// Returns an error if `PARKADE_DATA_DIR` is unset and the home directory
/// cannot be determined.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Resolves the database path using environment variables or defaults.
///
/// The resolution order is:
/// 1. `$PARKADE_DATA_DIR/parkade.db` if `PARKADE_DATA_DIR` is set
/// 2. `~/.parkade/parkade.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `PARKADE_DATA_DIR` is not set.
pub fn resolve_database_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join(DATABASE_FILE_NAME))
}
