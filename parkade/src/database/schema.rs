//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, triggers and
//! constants related to the database schema for the parkade store.
//!
//! Times of day are stored as seconds since midnight, dates as
//! `YYYY-MM-DD` text and money as integer cents.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the accounts table.
///
/// The credential hash is owned by the identity service and never read here.
pub const CREATE_ACCOUNTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS accounts (
        id INTEGER PRIMARY KEY,
        full_name TEXT NOT NULL,
        phone_number TEXT NOT NULL UNIQUE,
        credential_hash TEXT NOT NULL DEFAULT ''
    )";

/// SQL statement to create the wallets table.
///
/// One wallet per account. The `CHECK` constraint makes a negative balance
/// unrepresentable even if a statement forgets its guard.
pub const CREATE_WALLETS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS wallets (
        account_id INTEGER PRIMARY KEY NOT NULL
            REFERENCES accounts(id) ON DELETE CASCADE,
        balance INTEGER NOT NULL DEFAULT 0 CHECK (balance >= 0)
    )";

/// SQL statement to create the cars table.
pub const CREATE_CARS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS cars (
        id INTEGER PRIMARY KEY,
        account_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        model TEXT NOT NULL,
        plate TEXT NOT NULL,
        color TEXT NOT NULL
    )";

/// SQL statement to create the lots table.
pub const CREATE_LOTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS lots (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        capacity INTEGER NOT NULL CHECK (capacity >= 0),
        open_sec INTEGER NOT NULL,
        close_sec INTEGER NOT NULL,
        node1 TEXT NOT NULL DEFAULT '',
        node2 TEXT NOT NULL DEFAULT '',
        price INTEGER NOT NULL CHECK (price >= 0)
    )";

/// SQL statement to create the floors table.
pub const CREATE_FLOORS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS floors (
        id INTEGER PRIMARY KEY,
        lot_id INTEGER NOT NULL REFERENCES lots(id) ON DELETE CASCADE,
        number INTEGER NOT NULL,
        UNIQUE (lot_id, number)
    )";

/// SQL statement to create the spots table.
pub const CREATE_SPOTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS spots (
        id INTEGER PRIMARY KEY,
        floor_id INTEGER NOT NULL REFERENCES floors(id) ON DELETE CASCADE,
        number INTEGER NOT NULL,
        price INTEGER CHECK (price IS NULL OR price >= 0),
        UNIQUE (floor_id, number)
    )";

/// SQL statement to create the reservations table.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL REFERENCES accounts(id),
        car_id INTEGER NOT NULL REFERENCES cars(id),
        spot_id INTEGER NOT NULL REFERENCES spots(id),
        plate TEXT NOT NULL,
        date TEXT NOT NULL,
        start_sec INTEGER NOT NULL,
        end_sec INTEGER NOT NULL,
        price INTEGER NOT NULL CHECK (price >= 0),
        payment_mode TEXT NOT NULL CHECK (payment_mode IN ('online', 'wallet')),
        created_at INTEGER NOT NULL,
        CHECK (start_sec < end_sec)
    )";

/// SQL statement to create the availability index.
///
/// Every availability query and the overlap trigger filter on
/// `(spot_id, date)`.
pub const CREATE_SPOT_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_spot_date ON reservations(spot_id, date)";

/// SQL statement to create the history index.
pub const CREATE_ACCOUNT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_account ON reservations(account_id)";

/// Message raised by the overlap trigger.
pub const OVERLAP_TRIGGER_MESSAGE: &str = "reservation overlap";

/// SQL statement to create the overlap trigger.
///
/// Rejects any insert whose half-open window intersects an existing
/// reservation on the same spot and date.
pub const CREATE_OVERLAP_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS reservations_no_overlap
    BEFORE INSERT ON reservations
    WHEN EXISTS (
        SELECT 1 FROM reservations
        WHERE spot_id = NEW.spot_id
          AND date = NEW.date
          AND start_sec < NEW.end_sec
          AND end_sec > NEW.start_sec
    )
    BEGIN
        SELECT RAISE(ABORT, 'reservation overlap');
    END";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a reservation.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (account_id, car_id, spot_id, plate, date, start_sec, end_sec, price, payment_mode, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
";

/// SQL statement for the conditional wallet debit.
pub const DEBIT_WALLET: &str = r"
    UPDATE wallets
    SET balance = balance - ?1
    WHERE account_id = ?2 AND balance >= ?1
    RETURNING balance
";

/// SQL statement for the wallet credit, guarded against overflow.
pub const CREDIT_WALLET: &str = r"
    UPDATE wallets
    SET balance = balance + ?1
    WHERE account_id = ?2 AND balance <= ?3
    RETURNING balance
";
