//! Availability listings for one floor, date and window.

use chrono::NaiveDate;
use serde::Serialize;

use crate::amount::Amount;
use crate::inventory::{FloorId, LotId, SpotId};
use crate::reservation::ReservationId;
use crate::window::TimeWindow;

/// A spot that is taken at some instant of the queried window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupiedSpot {
    /// The occupied spot.
    pub spot_id: SpotId,
    /// Its number on the floor.
    pub spot_number: u32,
    /// The earliest overlapping reservation.
    pub reservation_id: ReservationId,
    /// The window of that reservation.
    pub window: TimeWindow,
    /// The price charged for it.
    pub price: Amount,
}

/// Occupancy summary for one floor.
///
/// `free == capacity - occupied.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorAvailability {
    /// The lot that was queried.
    pub lot_id: LotId,
    /// The floor that was queried.
    pub floor_id: FloorId,
    /// The queried date.
    pub date: NaiveDate,
    /// The queried window.
    pub window: TimeWindow,
    /// Total number of spots on the floor.
    pub capacity: u32,
    /// Occupied spots, by spot number.
    pub occupied: Vec<OccupiedSpot>,
    /// Number of spots free for the whole window.
    pub free: u32,
}

impl FloorAvailability {
    /// Returns `true` if the spot is taken during the window.
    #[must_use]
    pub fn is_occupied(&self, spot_id: SpotId) -> bool {
        self.occupied.iter().any(|o| o.spot_id == spot_id)
    }
}
