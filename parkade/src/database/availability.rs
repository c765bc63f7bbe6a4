//! Availability queries.
//!
//! A spot is occupied for `(date, window)` when a committed reservation on
//! the same spot and date satisfies `start < window.end AND end >
//! window.start`. Abutting windows never overlap.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::availability::{FloorAvailability, OccupiedSpot};
use crate::error::Result;
use crate::inventory::{FloorId, LotId, SpotId};
use crate::reservation::ReservationId;
use crate::window::TimeWindow;

use super::connection::Database;
use super::convert::{date_to_sql, window_columns};

const SELECT_OCCUPIED_SPOTS: &str = r"
    SELECT DISTINCT r.spot_id
    FROM reservations r
    JOIN spots s ON s.id = r.spot_id
    WHERE s.floor_id = ?1 AND r.date = ?2 AND r.start_sec < ?4 AND r.end_sec > ?3
";

const SELECT_OCCUPANCY: &str = r"
    SELECT r.spot_id, s.number, r.id, r.start_sec, r.end_sec, r.price
    FROM reservations r
    JOIN spots s ON s.id = r.spot_id
    WHERE s.floor_id = ?1 AND r.date = ?2 AND r.start_sec < ?4 AND r.end_sec > ?3
    ORDER BY s.number, r.start_sec
";

const SELECT_CONFLICT: &str = r"
    SELECT id
    FROM reservations
    WHERE spot_id = ?1 AND date = ?2 AND start_sec < ?4 AND end_sec > ?3
    ORDER BY start_sec
    LIMIT 1
";

impl Database {
    /// Returns the spots of a floor that are taken at any instant of
    /// `window` on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the floor does not exist or does
    /// not belong to the lot.
    pub fn find_occupied_spots(
        conn: &Connection,
        lot_id: LotId,
        floor_id: FloorId,
        date: NaiveDate,
        window: &TimeWindow,
    ) -> Result<BTreeSet<SpotId>> {
        Self::get_lot_floor(conn, lot_id, floor_id)?;

        let mut stmt = conn.prepare_cached(SELECT_OCCUPIED_SPOTS)?;
        let spots = stmt
            .query_map(
                params![
                    floor_id,
                    date_to_sql(date),
                    window.start_secs(),
                    window.end_secs()
                ],
                |row| row.get(0),
            )?
            .collect::<rusqlite::Result<BTreeSet<SpotId>>>()?;
        Ok(spots)
    }

    /// Returns the earliest reservation overlapping `window` on the spot, if
    /// any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_conflict(
        conn: &Connection,
        spot_id: SpotId,
        date: NaiveDate,
        window: &TimeWindow,
    ) -> Result<Option<ReservationId>> {
        let conflict = conn
            .prepare_cached(SELECT_CONFLICT)?
            .query_row(
                params![
                    spot_id,
                    date_to_sql(date),
                    window.start_secs(),
                    window.end_secs()
                ],
                |row| row.get(0),
            )
            .optional()?;
        Ok(conflict)
    }

    /// Returns `true` if no reservation on the spot overlaps `window` on
    /// `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_spot_free(
        conn: &Connection,
        spot_id: SpotId,
        date: NaiveDate,
        window: &TimeWindow,
    ) -> Result<bool> {
        Ok(Self::find_conflict(conn, spot_id, date, window)?.is_none())
    }

    /// Summarizes a floor's occupancy for `window` on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the floor does not exist or does
    /// not belong to the lot.
    pub fn floor_availability(
        conn: &Connection,
        lot_id: LotId,
        floor_id: FloorId,
        date: NaiveDate,
        window: &TimeWindow,
    ) -> Result<FloorAvailability> {
        Self::get_lot_floor(conn, lot_id, floor_id)?;
        let capacity = Self::get_floor_capacity(conn, floor_id)?;

        let mut stmt = conn.prepare_cached(SELECT_OCCUPANCY)?;
        let rows = stmt.query_map(
            params![
                floor_id,
                date_to_sql(date),
                window.start_secs(),
                window.end_secs()
            ],
            |row| {
                Ok(OccupiedSpot {
                    spot_id: row.get(0)?,
                    spot_number: row.get(1)?,
                    reservation_id: row.get(2)?,
                    window: window_columns(row, 3)?,
                    price: row.get(5)?,
                })
            },
        )?;

        // Several reservations can overlap one window; keep the earliest.
        let mut by_number: BTreeMap<u32, OccupiedSpot> = BTreeMap::new();
        for row in rows {
            let occupied = row?;
            by_number.entry(occupied.spot_number).or_insert(occupied);
        }
        let occupied: Vec<OccupiedSpot> = by_number.into_values().collect();
        let taken = u32::try_from(occupied.len()).unwrap_or(u32::MAX);

        Ok(FloorAvailability {
            lot_id,
            floor_id,
            date,
            window: *window,
            capacity,
            free: capacity.saturating_sub(taken),
            occupied,
        })
    }
}
