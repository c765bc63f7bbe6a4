//! Data directory initialization.
//!
//! Creates the data directory and the store, and optionally writes a
//! commented `config.yaml` listing every setting with its default.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};

/// Options for [`init_data_dir`].
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing store.
    pub overwrite: bool,
    /// Write a sample configuration file.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates options that neither overwrite nor write a config file.
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether an existing store is replaced.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether a sample configuration file is written.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// What [`init_data_dir`] created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitResult {
    /// The directory did not exist before.
    pub data_dir_created: bool,
    /// The store was created or replaced.
    pub database_created: bool,
    /// A configuration file was written.
    pub config_created: bool,
    /// The initialized directory.
    pub data_dir: PathBuf,
}

const SAMPLE_CONFIG: &str = r"# parkade configuration
#
# Every setting is optional. Environment variables named PARKADE_<SETTING>
# override the values in this file.

# Seconds a writer waits for the database lock (default: 5)
# maximum_lock_wait_seconds: 5

# Window length used when only a start time is given (default: 60)
# default_window_minutes: 60

# Longest window that can be reserved, in minutes (default: unlimited)
# max_window_minutes: 480

# Reject windows outside a lot's opening hours (default: false)
# enforce_operating_hours: false

# Fail instead of creating the data directory on first use (default: false)
# disable_autoinit: false

# Output format for listings: table, json or csv (default: table)
# output_format: table
";

/// Initializes a data directory.
///
/// # Errors
///
/// Returns [`Error::Validation`] if a store already exists and `overwrite`
/// is not set, or an I/O or store error.
///
/// # Examples
///
/// ```no_run
/// use parkade::operations::{init_data_dir, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/parkade")).with_create_config(true);
/// let result = init_data_dir(&options).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_data_dir(options: &InitOptions) -> Result<InitResult> {
    let data_dir_created = !options.data_dir.exists();
    if data_dir_created {
        fs::create_dir_all(&options.data_dir)?;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "a database already exists at {}; pass --overwrite to replace it",
                    db_path.display()
                ),
            });
        }
        remove_store(&db_path)?;
    }

    Database::open(DatabaseConfig::new(&db_path))?;

    let config_path = options.data_dir.join(CONFIG_FILE_NAME);
    let config_created = options.create_config && !config_path.exists();
    if config_created {
        fs::write(&config_path, SAMPLE_CONFIG)?;
    }

    log::info!("initialized data directory {}", options.data_dir.display());
    Ok(InitResult {
        data_dir_created,
        database_created: true,
        config_created,
        data_dir: options.data_dir.clone(),
    })
}

/// Removes the store file and its WAL companions.
fn remove_store(db_path: &Path) -> Result<()> {
    fs::remove_file(db_path)?;
    for suffix in ["-wal", "-shm"] {
        let mut companion = db_path.as_os_str().to_owned();
        companion.push(suffix);
        let companion = PathBuf::from(companion);
        if companion.exists() {
            fs::remove_file(companion)?;
        }
    }
    Ok(())
}
