//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_ACCOUNTS_TABLE, CREATE_ACCOUNT_INDEX, CREATE_CARS_TABLE, CREATE_FLOORS_TABLE,
    CREATE_LOTS_TABLE, CREATE_METADATA_TABLE, CREATE_OVERLAP_TRIGGER, CREATE_RESERVATIONS_TABLE,
    CREATE_SPOTS_TABLE, CREATE_SPOT_DATE_INDEX, CREATE_WALLETS_TABLE, CURRENT_SCHEMA_VERSION,
    INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// This function creates all tables, indices, the overlap trigger and the
/// schema version for a fresh database. All statements run in a single
/// write transaction; every statement is idempotent.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use parkade::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    tx.execute(CREATE_METADATA_TABLE, [])?;

    tx.execute(CREATE_ACCOUNTS_TABLE, [])?;
    tx.execute(CREATE_WALLETS_TABLE, [])?;
    tx.execute(CREATE_CARS_TABLE, [])?;
    tx.execute(CREATE_LOTS_TABLE, [])?;
    tx.execute(CREATE_FLOORS_TABLE, [])?;
    tx.execute(CREATE_SPOTS_TABLE, [])?;
    tx.execute(CREATE_RESERVATIONS_TABLE, [])?;

    tx.execute(CREATE_SPOT_DATE_INDEX, [])?;
    tx.execute(CREATE_ACCOUNT_INDEX, [])?;
    tx.execute_batch(CREATE_OVERLAP_TRIGGER)?;

    tx.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    tx.commit()?;

    log::debug!("initialized database schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (which indicates version 0).
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
/// - `Err(_)` if a database error occurs
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value.parse::<i32>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => {
            // "no such table: metadata" on a database that was never initialized
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// This function:
/// 1. Checks the current schema version
/// 2. If version is 0, initializes the schema
/// 3. If the version differs from the current one, returns
///    [`Error::UnsupportedSchemaVersion`]
///
/// # Errors
///
/// Returns an error if the schema version is incompatible, initialization
/// fails, or a database query fails.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use parkade::database::migrations::check_schema_compatibility;
///
/// let conn = Connection::open_in_memory().unwrap();
/// check_schema_compatibility(&conn).unwrap();
/// ```
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
