//! SQLite store for lots, spots, accounts, wallets and reservations.
//!
//! Every write runs inside an IMMEDIATE transaction, so concurrent writers
//! serialize on the database lock and a writer that waits longer than the
//! configured busy timeout gets [`crate::Error::LockTimeout`]. Functions that
//! take a `&Connection` compose inside a caller's transaction; the `&mut self`
//! methods open their own.
//!
//! # Examples
//!
//! ```no_run
//! use parkade::database::{Database, DatabaseConfig};
//! use parkade::catalog::CatalogFile;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/parkade.db")).unwrap();
//! let catalog = CatalogFile::load("catalog.yaml".as_ref()).unwrap();
//! let summary = db.import_catalog(&catalog).unwrap();
//!
//! for lot in Database::list_lots(db.connection()).unwrap() {
//!     println!("{} {}", lot.id, lot.name);
//! }
//! # let _ = summary;
//! ```

mod availability;
mod catalog;
mod config;
mod connection;
mod convert;
mod inventory;
pub mod migrations;
mod reservations;
mod schema;
mod transaction;
mod wallet;

#[cfg(test)]
pub(crate) mod test_util;

pub use catalog::ImportSummary;
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use reservations::NewReservation;

pub(crate) use transaction::lock_aware;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
