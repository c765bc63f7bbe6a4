//! Conversions between domain values and their column representations.

use std::time::{Duration, SystemTime};

use chrono::{NaiveDate, NaiveTime, Timelike};
use rusqlite::types::Type;

use crate::error::{Error, Result};
use crate::window::TimeWindow;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Reads a `YYYY-MM-DD` column.
pub(crate) fn date_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a seconds-since-midnight column.
pub(crate) fn time_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveTime> {
    let secs: u32 = row.get(idx)?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, i64::from(secs)))
}

pub(crate) fn time_to_sql(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight()
}

/// Reads a `(start_sec, end_sec)` column pair.
pub(crate) fn window_columns(
    row: &rusqlite::Row<'_>,
    start_idx: usize,
) -> rusqlite::Result<TimeWindow> {
    let start: u32 = row.get(start_idx)?;
    let end: u32 = row.get(start_idx + 1)?;
    TimeWindow::from_secs(start, end).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(start_idx, Type::Integer, Box::new(e))
    })
}

/// Reads a parsed text column, such as a payment mode.
pub(crate) fn parsed_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let text: String = row.get(idx)?;
    text.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}
