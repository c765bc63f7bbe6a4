//! Shared fixtures for database unit tests.

use std::time::SystemTime;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use tempfile::tempdir;

use crate::amount::Amount;
use crate::catalog::CatalogFile;
use crate::database::{Database, DatabaseConfig, NewReservation};
use crate::inventory::{AccountId, CarId, FloorId, LotId, SpotId};
use crate::reservation::PaymentMode;
use crate::window::TimeWindow;

/// One lot with a single five-spot floor, and two accounts with one car each.
///
/// Spot 5 is priced above the lot default. Only the first account has money.
pub const SEED_CATALOG: &str = r#"
lots:
  - id: 1
    name: Central
    open_time: "07:00"
    close_time: "22:00"
    node1: "40.1772"
    node2: "44.5035"
    price: 15
    floors:
      - number: 1
        spot_count: 5
        spots:
          - number: 5
            price: 25
accounts:
  - id: 1
    full_name: Sam Driver
    phone_number: "+15550100"
    balance: 50
    cars:
      - id: 1
        model: Corolla
        plate: 12A345
        color: white
  - id: 2
    full_name: Alex Other
    phone_number: "+15550101"
    cars:
      - id: 2
        model: Civic
        plate: 77XY001
        color: blue
"#;

/// Ids of the rows created from [`SEED_CATALOG`].
#[derive(Debug, Clone, Copy)]
pub struct SeededIds {
    pub lot: LotId,
    pub floor: FloorId,
    pub account: AccountId,
    pub other_account: AccountId,
    pub car: CarId,
    pub other_car: CarId,
}

/// Creates a temporary test database that is cleaned up with the process
/// temp dir.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the rest of the test
    std::mem::forget(dir);

    db
}

/// Creates a test database loaded with [`SEED_CATALOG`].
///
/// # Panics
///
/// Panics if the catalog cannot be imported.
#[must_use]
pub fn create_seeded_database() -> (Database, SeededIds) {
    let mut db = create_test_database();
    let catalog = CatalogFile::from_yaml_str(SEED_CATALOG).unwrap();
    db.import_catalog(&catalog).unwrap();

    let lot = LotId::new(1);
    let floor = Database::list_floors(db.connection(), lot).unwrap()[0].id;
    let ids = SeededIds {
        lot,
        floor,
        account: AccountId::new(1),
        other_account: AccountId::new(2),
        car: CarId::new(1),
        other_car: CarId::new(2),
    };
    (db, ids)
}

/// The date used by most tests.
#[must_use]
pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

/// Whole-hour window `[start:00, end:00)`.
#[must_use]
pub fn window(start: u32, end: u32) -> TimeWindow {
    TimeWindow::new(
        NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
    )
    .unwrap()
}

/// Inserts an online-paid reservation for the first seeded account on spot
/// `spot_number` of the seeded floor, bypassing the reservation workflow.
///
/// # Panics
///
/// Panics if the spot does not exist or the slot is taken.
pub fn reserve_directly(
    conn: &Connection,
    ids: &SeededIds,
    spot_number: u32,
    window: TimeWindow,
) -> SpotId {
    let spot = Database::resolve_spot(conn, ids.lot, ids.floor, spot_number).unwrap();
    Database::insert_reservation(
        conn,
        &NewReservation {
            account_id: ids.account,
            car_id: ids.car,
            spot_id: spot.id,
            plate: "12A345",
            date: date(),
            window,
            price: Amount::from_cents(1500),
            payment_mode: PaymentMode::Online,
            created_at: SystemTime::now(),
        },
    )
    .unwrap();
    spot.id
}
