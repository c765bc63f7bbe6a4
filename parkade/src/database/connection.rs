//! Database connection management.
//!
//! This module provides the main database connection type with proper
//! initialization and PRAGMA settings for concurrent `SQLite` access.

use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// Each thread or process opens its own `Database`; the type is `Send` but
/// is never shared. Writers are serialized by the `SQLite` write lock.
///
/// # Examples
///
/// ```no_run
/// use parkade::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/parkade.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode for concurrent access
    /// - Enable foreign keys and configure the busy timeout
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened
    /// - The parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - Schema initialization or verification fails
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // The busy timeout goes first so that the pragmas below wait for a
        // concurrent opener instead of failing.
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // PRAGMA journal_mode returns a result, so we use query_row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;

        if !config.read_only {
            super::migrations::check_schema_compatibility(&conn)?;
        }

        log::debug!("opened database at {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Returns the configuration this connection was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns the configured lock wait.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.config.busy_timeout
    }

    /// Temporarily changes how long this connection waits for the write
    /// lock. [`Database::reset_busy_timeout`] restores the configured value.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout cannot be applied.
    pub fn set_busy_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.conn.busy_timeout(timeout)?;
        Ok(())
    }

    /// Restores the configured lock wait.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout cannot be applied.
    pub fn reset_busy_timeout(&mut self) -> Result<()> {
        self.conn.busy_timeout(self.config.busy_timeout)?;
        Ok(())
    }
}
