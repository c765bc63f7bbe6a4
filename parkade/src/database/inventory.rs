//! Read-only inventory lookups.
//!
//! All functions take a plain `&Connection` so they can run either on their
//! own or inside an open transaction.

use rusqlite::{params, Connection, OptionalExtension};

use crate::amount::Amount;
use crate::error::{Error, Result};
use crate::inventory::{
    Account, AccountId, Car, CarId, Floor, FloorId, Lot, LotId, LotSummary, PriceTarget, Spot,
    SpotId,
};

use super::connection::Database;
use super::convert::time_column;

const SELECT_LOT: &str = r"
    SELECT id, name, capacity, open_sec, close_sec, node1, node2, price
    FROM lots
    WHERE id = ?
";

const LIST_LOTS: &str = "SELECT id, name FROM lots ORDER BY id";

const SELECT_FLOOR: &str = "SELECT id, lot_id, number FROM floors WHERE id = ?";

const LIST_FLOORS: &str = "SELECT id, lot_id, number FROM floors WHERE lot_id = ? ORDER BY number";

const COUNT_FLOOR_SPOTS: &str = "SELECT COUNT(*) FROM spots WHERE floor_id = ?";

const SELECT_SPOT: &str = r"
    SELECT s.id, f.lot_id, s.floor_id, s.number, s.price
    FROM spots s
    JOIN floors f ON f.id = s.floor_id
    WHERE s.id = ?
";

const RESOLVE_SPOT: &str = r"
    SELECT s.id, f.lot_id, s.floor_id, s.number, s.price
    FROM spots s
    JOIN floors f ON f.id = s.floor_id
    WHERE f.lot_id = ?1 AND s.floor_id = ?2 AND s.number = ?3
";

const SELECT_SPOT_PRICE: &str = r"
    SELECT COALESCE(s.price, l.price)
    FROM spots s
    JOIN floors f ON f.id = s.floor_id
    JOIN lots l ON l.id = f.lot_id
    WHERE s.id = ?
";

const SELECT_LOT_PRICE: &str = "SELECT price FROM lots WHERE id = ?";

const SELECT_CAR: &str = "SELECT id, account_id, model, plate, color FROM cars WHERE id = ?";

const LIST_CARS: &str =
    "SELECT id, account_id, model, plate, color FROM cars WHERE account_id = ? ORDER BY id";

const SELECT_ACCOUNT: &str = "SELECT id, full_name, phone_number FROM accounts WHERE id = ?";

fn row_to_lot(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lot> {
    Ok(Lot {
        id: row.get(0)?,
        name: row.get(1)?,
        capacity: row.get(2)?,
        open_time: time_column(row, 3)?,
        close_time: time_column(row, 4)?,
        node1: row.get(5)?,
        node2: row.get(6)?,
        price: row.get(7)?,
    })
}

fn row_to_floor(row: &rusqlite::Row<'_>) -> rusqlite::Result<Floor> {
    Ok(Floor {
        id: row.get(0)?,
        lot_id: row.get(1)?,
        number: row.get(2)?,
    })
}

fn row_to_spot(row: &rusqlite::Row<'_>) -> rusqlite::Result<Spot> {
    Ok(Spot {
        id: row.get(0)?,
        lot_id: row.get(1)?,
        floor_id: row.get(2)?,
        number: row.get(3)?,
        price: row.get(4)?,
    })
}

fn row_to_car(row: &rusqlite::Row<'_>) -> rusqlite::Result<Car> {
    Ok(Car {
        id: row.get(0)?,
        account_id: row.get(1)?,
        model: row.get(2)?,
        plate: row.get(3)?,
        color: row.get(4)?,
    })
}

impl Database {
    /// Looks up a lot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the lot does not exist.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parkade::database::{Database, DatabaseConfig};
    /// use parkade::LotId;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/parkade.db")).unwrap();
    /// let lot = Database::get_lot(db.connection(), LotId::new(1)).unwrap();
    /// println!("{} opens at {}", lot.name, lot.open_time);
    /// ```
    pub fn get_lot(conn: &Connection, lot_id: LotId) -> Result<Lot> {
        conn.query_row(SELECT_LOT, [lot_id], row_to_lot)
            .optional()?
            .ok_or_else(|| Error::not_found(lot_id.describe()))
    }

    /// Lists every lot by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_lots(conn: &Connection) -> Result<Vec<LotSummary>> {
        let mut stmt = conn.prepare(LIST_LOTS)?;
        let lots = stmt
            .query_map([], |row| {
                Ok(LotSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(lots)
    }

    /// Looks up a floor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the floor does not exist.
    pub fn get_floor(conn: &Connection, floor_id: FloorId) -> Result<Floor> {
        conn.query_row(SELECT_FLOOR, [floor_id], row_to_floor)
            .optional()?
            .ok_or_else(|| Error::not_found(floor_id.describe()))
    }

    /// Looks up a floor and checks that it belongs to `lot_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the floor does not exist or belongs to
    /// another lot.
    pub fn get_lot_floor(conn: &Connection, lot_id: LotId, floor_id: FloorId) -> Result<Floor> {
        let floor = Self::get_floor(conn, floor_id)?;
        if floor.lot_id == lot_id {
            Ok(floor)
        } else {
            Err(Error::not_found(format!("floor {floor_id} in lot {lot_id}")))
        }
    }

    /// Lists the floors of a lot by floor number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the lot does not exist.
    pub fn list_floors(conn: &Connection, lot_id: LotId) -> Result<Vec<Floor>> {
        Self::get_lot(conn, lot_id)?;
        let mut stmt = conn.prepare(LIST_FLOORS)?;
        let floors = stmt
            .query_map([lot_id], row_to_floor)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(floors)
    }

    /// Returns the number of spots on a floor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the floor does not exist.
    pub fn get_floor_capacity(conn: &Connection, floor_id: FloorId) -> Result<u32> {
        Self::get_floor(conn, floor_id)?;
        let count: u32 = conn.query_row(COUNT_FLOOR_SPOTS, [floor_id], |row| row.get(0))?;
        Ok(count)
    }

    /// Looks up a spot by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the spot does not exist.
    pub fn get_spot(conn: &Connection, spot_id: SpotId) -> Result<Spot> {
        conn.query_row(SELECT_SPOT, [spot_id], row_to_spot)
            .optional()?
            .ok_or_else(|| Error::not_found(spot_id.describe()))
    }

    /// Finds the spot with `spot_number` on the given floor of the given lot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpotNotFound`] if no such spot exists, including when
    /// the floor belongs to a different lot.
    pub fn resolve_spot(
        conn: &Connection,
        lot_id: LotId,
        floor_id: FloorId,
        spot_number: u32,
    ) -> Result<Spot> {
        conn.query_row(
            RESOLVE_SPOT,
            params![lot_id, floor_id, spot_number],
            row_to_spot,
        )
        .optional()?
        .ok_or(Error::SpotNotFound {
            lot_id,
            floor_id,
            spot_number,
        })
    }

    /// Returns the effective price of a spot, or the default price of a lot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the spot or lot does not exist.
    pub fn get_spot_price(conn: &Connection, target: PriceTarget) -> Result<Amount> {
        let price = match target {
            PriceTarget::Spot(spot_id) => conn
                .query_row(SELECT_SPOT_PRICE, [spot_id], |row| row.get(0))
                .optional()?
                .ok_or_else(|| Error::not_found(spot_id.describe()))?,
            PriceTarget::Lot(lot_id) => conn
                .query_row(SELECT_LOT_PRICE, [lot_id], |row| row.get(0))
                .optional()?
                .ok_or_else(|| Error::not_found(lot_id.describe()))?,
        };
        Ok(price)
    }

    /// Looks up a car.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the car does not exist.
    pub fn get_car(conn: &Connection, car_id: CarId) -> Result<Car> {
        conn.query_row(SELECT_CAR, [car_id], row_to_car)
            .optional()?
            .ok_or_else(|| Error::not_found(car_id.describe()))
    }

    /// Lists the cars registered to an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_cars(conn: &Connection, account_id: AccountId) -> Result<Vec<Car>> {
        let mut stmt = conn.prepare(LIST_CARS)?;
        let cars = stmt
            .query_map([account_id], row_to_car)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cars)
    }

    /// Looks up an account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the account does not exist.
    pub fn get_account(conn: &Connection, account_id: AccountId) -> Result<Account> {
        conn.query_row(SELECT_ACCOUNT, [account_id], |row| {
            Ok(Account {
                id: row.get(0)?,
                full_name: row.get(1)?,
                phone_number: row.get(2)?,
            })
        })
        .optional()?
        .ok_or_else(|| Error::not_found(account_id.describe()))
    }
}
