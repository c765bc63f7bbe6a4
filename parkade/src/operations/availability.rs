//! Availability lookups with the window completed from configuration.

use chrono::{NaiveDate, NaiveTime};

use crate::availability::FloorAvailability;
use crate::config::Config;
use crate::database::Database;
use crate::error::Result;
use crate::inventory::{FloorId, LotId};
use crate::window::TimeWindow;

/// Builds the queried window. Without `end` the window lasts
/// `default_minutes`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] if the window is empty or would
/// run past midnight.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use parkade::operations::resolve_window;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(resolve_window(start, None, 60).unwrap().to_string(), "09:00-10:00");
/// assert!(resolve_window(start, Some(start), 60).is_err());
/// ```
pub fn resolve_window(
    start: NaiveTime,
    end: Option<NaiveTime>,
    default_minutes: u32,
) -> Result<TimeWindow> {
    let window = match end {
        Some(end) => TimeWindow::new(start, end)?,
        None => TimeWindow::starting_at(start, default_minutes)?,
    };
    Ok(window)
}

/// A floor availability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    /// The lot.
    pub lot_id: LotId,
    /// The floor within the lot.
    pub floor_id: FloorId,
    /// The date.
    pub date: NaiveDate,
    /// Window start.
    pub start: NaiveTime,
    /// Window end; the configured default length applies when `None`.
    pub end: Option<NaiveTime>,
}

impl AvailabilityQuery {
    /// Creates a query with an open end.
    #[must_use]
    pub const fn new(lot_id: LotId, floor_id: FloorId, date: NaiveDate, start: NaiveTime) -> Self {
        Self {
            lot_id,
            floor_id,
            date,
            start,
            end: None,
        }
    }

    /// Sets the window end.
    #[must_use]
    pub const fn with_end(mut self, end: Option<NaiveTime>) -> Self {
        self.end = end;
        self
    }
}

/// Summarizes a floor's occupancy.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] for a bad window, or
/// [`crate::Error::NotFound`] if the floor is not part of the lot.
pub fn floor_availability(
    db: &Database,
    query: &AvailabilityQuery,
    config: &Config,
) -> Result<FloorAvailability> {
    let window = resolve_window(query.start, query.end, config.default_window_minutes())?;
    let availability = Database::floor_availability(
        db.connection(),
        query.lot_id,
        query.floor_id,
        query.date,
        &window,
    )?;
    log::debug!(
        "floor {} of lot {} on {} {}: {} of {} free",
        query.floor_id,
        query.lot_id,
        query.date,
        window,
        availability.free,
        availability.capacity
    );
    Ok(availability)
}
