//! Reservation rows.
//!
//! Reservations are only ever inserted; nothing in the crate updates or
//! deletes them.

use std::time::SystemTime;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::amount::Amount;
use crate::error::{Error, Result};
use crate::inventory::{AccountId, CarId, SpotId};
use crate::reservation::{PaymentMode, Reservation, ReservationDetail, ReservationId};
use crate::window::TimeWindow;

use super::connection::Database;
use super::convert::{
    date_column, date_to_sql, parsed_column, systemtime_to_unix_secs, unix_secs_to_systemtime,
    window_columns,
};
use super::schema::{INSERT_RESERVATION, OVERLAP_TRIGGER_MESSAGE};

const RESERVATION_COLUMNS: &str = r"
    id, account_id, car_id, spot_id, plate, date, start_sec, end_sec, price, payment_mode, created_at
";

const SELECT_RESERVATION: &str = "SELECT {columns} FROM reservations WHERE id = ?";

const SELECT_SPOT_RESERVATIONS: &str =
    "SELECT {columns} FROM reservations WHERE spot_id = ?1 AND date = ?2 ORDER BY start_sec";

const SELECT_HISTORY: &str = r"
    SELECT r.id, l.id, l.name, f.number, s.number, r.date, r.start_sec, r.end_sec,
           r.plate, r.price, r.payment_mode
    FROM reservations r
    JOIN spots s ON s.id = r.spot_id
    JOIN floors f ON f.id = s.floor_id
    JOIN lots l ON l.id = f.lot_id
    WHERE r.account_id = ?
    ORDER BY r.date DESC, r.start_sec DESC, r.id DESC
";

/// Values for a reservation row that has not been inserted yet.
#[derive(Debug, Clone)]
pub struct NewReservation<'a> {
    /// Reserving account.
    pub account_id: AccountId,
    /// Reserved car.
    pub car_id: CarId,
    /// Reserved spot.
    pub spot_id: SpotId,
    /// Plate snapshot.
    pub plate: &'a str,
    /// Reserved date.
    pub date: NaiveDate,
    /// Reserved window.
    pub window: TimeWindow,
    /// Price charged.
    pub price: Amount,
    /// Payment mode.
    pub payment_mode: PaymentMode,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

fn columns(sql: &str) -> String {
    sql.replace("{columns}", RESERVATION_COLUMNS.trim())
}

/// Expects the columns of `RESERVATION_COLUMNS` in order.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: ReservationId = row.get(0)?;
    let account_id: AccountId = row.get(1)?;
    let car_id: CarId = row.get(2)?;
    let spot_id: SpotId = row.get(3)?;
    let plate: String = row.get(4)?;
    let date = date_column(row, 5)?;
    let window = window_columns(row, 6)?;
    let price: Amount = row.get(8)?;
    let payment_mode: PaymentMode = parsed_column(row, 9)?;
    let created_secs: i64 = row.get(10)?;

    Reservation::builder(id, spot_id, date, window)
        .account(account_id)
        .car(car_id)
        .plate(plate)
        .price(price)
        .payment_mode(payment_mode)
        .created_at(unix_secs_to_systemtime(created_secs))
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn is_overlap_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(message)) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains(OVERLAP_TRIGGER_MESSAGE)
        }
        _ => false,
    }
}

impl Database {
    /// Inserts a reservation row using an existing connection or
    /// transaction.
    ///
    /// The overlap trigger is the last line of defence against
    /// double-booking; its rejection is reported as
    /// [`Error::SlotUnavailable`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::SlotUnavailable`] if the window overlaps an existing
    /// reservation, or a store error.
    pub fn insert_reservation(conn: &Connection, new: &NewReservation<'_>) -> Result<Reservation> {
        let created_secs = systemtime_to_unix_secs(new.created_at)?;

        let inserted = conn.execute(
            INSERT_RESERVATION,
            params![
                new.account_id,
                new.car_id,
                new.spot_id,
                new.plate,
                date_to_sql(new.date),
                new.window.start_secs(),
                new.window.end_secs(),
                new.price,
                new.payment_mode.as_str(),
                created_secs,
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(e) if is_overlap_violation(&e) => {
                return Err(Error::SlotUnavailable {
                    spot_id: new.spot_id,
                    date: new.date,
                    window: new.window,
                    conflicting: Self::find_conflict(conn, new.spot_id, new.date, &new.window)?,
                });
            }
            Err(e) => return Err(e.into()),
        }

        let id = ReservationId::new(conn.last_insert_rowid());
        Reservation::builder(id, new.spot_id, new.date, new.window)
            .account(new.account_id)
            .car(new.car_id)
            .plate(new.plate)
            .price(new.price)
            .payment_mode(new.payment_mode)
            .created_at(unix_secs_to_systemtime(created_secs))
            .build()
    }

    /// Looks up a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no reservation has this id.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
        conn.query_row(&columns(SELECT_RESERVATION), [id], row_to_reservation)
            .optional()?
            .ok_or_else(|| Error::not_found(id.describe()))
    }

    /// Lists the reservations of one spot on one date, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_spot_reservations(
        conn: &Connection,
        spot_id: SpotId,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(&columns(SELECT_SPOT_RESERVATIONS))?;
        let reservations = stmt
            .query_map(params![spot_id, date_to_sql(date)], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Lists an account's reservations with lot, floor and spot names,
    /// newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn history(conn: &Connection, account_id: AccountId) -> Result<Vec<ReservationDetail>> {
        let mut stmt = conn.prepare(SELECT_HISTORY)?;
        let details = stmt
            .query_map([account_id], |row| {
                Ok(ReservationDetail {
                    id: row.get(0)?,
                    lot_id: row.get(1)?,
                    lot_name: row.get(2)?,
                    floor_number: row.get(3)?,
                    spot_number: row.get(4)?,
                    date: date_column(row, 5)?,
                    window: window_columns(row, 6)?,
                    plate: row.get(8)?,
                    price: row.get(9)?,
                    payment_mode: parsed_column(row, 10)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_seeded_database, date, window};

    fn new_reservation(spot_id: SpotId, window: TimeWindow) -> NewReservation<'static> {
        NewReservation {
            account_id: AccountId::new(1),
            car_id: CarId::new(1),
            spot_id,
            plate: "12A345",
            date: date(),
            window,
            price: Amount::from_cents(2000),
            payment_mode: PaymentMode::Online,
            created_at: SystemTime::now(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let (db, ids) = create_seeded_database();
        let conn = db.connection();
        let spot = Database::resolve_spot(conn, ids.lot, ids.floor, 3).unwrap();

        let created =
            Database::insert_reservation(conn, &new_reservation(spot.id, window(9, 10))).unwrap();
        let loaded = Database::get_reservation(conn, created.id()).unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.plate(), "12A345");
        assert_eq!(loaded.window().to_string(), "09:00-10:00");
    }

    #[test]
    fn test_get_reservation_not_found() {
        let (db, _) = create_seeded_database();
        let err = Database::get_reservation(db.connection(), ReservationId::new(77)).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_trigger_rejects_overlap() {
        let (db, ids) = create_seeded_database();
        let conn = db.connection();
        let spot = Database::resolve_spot(conn, ids.lot, ids.floor, 3).unwrap();

        let first =
            Database::insert_reservation(conn, &new_reservation(spot.id, window(9, 11))).unwrap();
        let err = Database::insert_reservation(conn, &new_reservation(spot.id, window(10, 12)))
            .unwrap_err();

        match err {
            Error::SlotUnavailable { conflicting, .. } => {
                assert_eq!(conflicting, Some(first.id()));
            }
            other => panic!("expected SlotUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_trigger_allows_abutting_windows() {
        let (db, ids) = create_seeded_database();
        let conn = db.connection();
        let spot = Database::resolve_spot(conn, ids.lot, ids.floor, 3).unwrap();

        Database::insert_reservation(conn, &new_reservation(spot.id, window(10, 11))).unwrap();
        Database::insert_reservation(conn, &new_reservation(spot.id, window(11, 12))).unwrap();
        Database::insert_reservation(conn, &new_reservation(spot.id, window(9, 10))).unwrap();

        let listed = Database::list_spot_reservations(conn, spot.id, date()).unwrap();
        let windows: Vec<String> = listed.iter().map(|r| r.window().to_string()).collect();
        assert_eq!(windows, vec!["09:00-10:00", "10:00-11:00", "11:00-12:00"]);
    }

    #[test]
    fn test_history_newest_first() {
        let (db, ids) = create_seeded_database();
        let conn = db.connection();
        let spot = Database::resolve_spot(conn, ids.lot, ids.floor, 2).unwrap();

        let mut early = new_reservation(spot.id, window(9, 10));
        early.date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        Database::insert_reservation(conn, &early).unwrap();
        Database::insert_reservation(conn, &new_reservation(spot.id, window(9, 10))).unwrap();

        let history = Database::history(conn, ids.account).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, date());
        assert_eq!(history[1].date, early.date);
        assert_eq!(history[0].lot_name, "Central");
        assert_eq!(history[0].floor_number, 1);
        assert_eq!(history[0].spot_number, 2);

        assert!(Database::history(conn, ids.other_account).unwrap().is_empty());
    }
}
