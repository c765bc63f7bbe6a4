//! Common fixtures for integration tests.
//!
//! Each test gets its own store file in a temporary directory. Threads that
//! need to write concurrently open their own connection with
//! [`TestStore::open`].

use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use parkade::catalog::CatalogFile;
use parkade::operations::ReserveRequest;
use parkade::{
    AccountId, CarId, Database, DatabaseConfig, FloorId, ImportSummary, LotId, TimeWindow,
};
use tempfile::TempDir;

/// Two lots; the first has two floors of four spots, the second one floor of
/// two. Three accounts with one car each and balances 50, 30 and 0.
pub const CATALOG: &str = r#"
lots:
  - name: Harbor
    open_time: "06:00"
    close_time: "23:00"
    node1: "40.1800"
    node2: "44.5100"
    price: 20
    floors:
      - number: 1
        spot_count: 4
      - number: 2
        spot_count: 4
        spots:
          - number: 4
            price: "35.50"
  - name: Station
    open_time: "00:00"
    close_time: "00:00"
    price: 10
    floors:
      - number: 0
        spot_count: 2
accounts:
  - full_name: Sam Driver
    phone_number: "+15550100"
    balance: 50
    cars:
      - model: Corolla
        plate: 12A345
        color: white
  - full_name: Alex Other
    phone_number: "+15550101"
    balance: 30
    cars:
      - model: Civic
        plate: 77XY001
        color: blue
  - full_name: Jo Empty
    phone_number: "+15550102"
    cars:
      - model: Leaf
        plate: EV0001
        color: green
"#;

/// A store file that lives as long as the fixture.
pub struct TestStore {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parkade.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();
        Self { _dir: dir, path }
    }

    /// Creates a store loaded with [`CATALOG`].
    pub fn seeded() -> (Self, Seeded) {
        let store = Self::new();
        let mut db = store.open();
        let catalog = CatalogFile::from_yaml_str(CATALOG).unwrap();
        let summary = db.import_catalog(&catalog).unwrap();
        let seeded = Seeded::resolve(&db, &summary);
        (store, seeded)
    }

    /// Opens a new connection with the default lock wait.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path)).unwrap()
    }

    /// Opens a new connection with a custom lock wait.
    #[allow(dead_code)]
    pub fn open_with_timeout(&self, timeout: Duration) -> Database {
        Database::open(DatabaseConfig::new(&self.path).with_busy_timeout(timeout)).unwrap()
    }
}

/// Ids created from [`CATALOG`].
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub struct Seeded {
    pub harbor: LotId,
    pub harbor_ground: FloorId,
    pub harbor_upper: FloorId,
    pub station: LotId,
    pub station_basement: FloorId,
    pub sam: AccountId,
    pub sam_car: CarId,
    pub alex: AccountId,
    pub alex_car: CarId,
    pub jo: AccountId,
    pub jo_car: CarId,
}

impl Seeded {
    fn resolve(db: &Database, summary: &ImportSummary) -> Self {
        let conn = db.connection();
        let floors = |lot| Database::list_floors(conn, lot).unwrap();
        let car = |account| Database::list_cars(conn, account).unwrap()[0].id;

        let harbor = summary.lot_ids[0];
        let station = summary.lot_ids[1];
        let harbor_floors = floors(harbor);
        let [sam, alex, jo] = [
            summary.account_ids[0],
            summary.account_ids[1],
            summary.account_ids[2],
        ];

        Self {
            harbor,
            harbor_ground: harbor_floors[0].id,
            harbor_upper: harbor_floors[1].id,
            station,
            station_basement: floors(station)[0].id,
            sam,
            sam_car: car(sam),
            alex,
            alex_car: car(alex),
            jo,
            jo_car: car(jo),
        }
    }

    /// A request by Sam for a ground floor spot at Harbor.
    pub fn sam_request(&self, spot_number: u32, window: &str) -> ReserveRequest {
        ReserveRequest::new(
            self.sam,
            self.sam_car,
            self.harbor,
            self.harbor_ground,
            spot_number,
            day(),
            parse_window(window),
        )
    }
}

/// The date used by most tests.
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

/// Parses `HH:MM-HH:MM`.
pub fn parse_window(s: &str) -> TimeWindow {
    s.parse().unwrap()
}

/// Shorthand for a whole-hour time.
#[allow(dead_code)]
pub fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}
