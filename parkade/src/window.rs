//! Half-open time windows within a single day.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` of wall-clock time on one date.
///
/// Windows never wrap past midnight: `start < end` always holds. Both ends
/// are whole seconds, matching the store's seconds-since-midnight columns,
/// so the latest possible end is `23:59:59`. A full-day lot therefore
/// cannot be reserved up to midnight itself; `23:00-23:59:59` is the last
/// hour-long slot of the day.
///
/// # Examples
///
/// ```
/// use parkade::TimeWindow;
///
/// let morning: TimeWindow = "09:00-10:00".parse().unwrap();
/// let later: TimeWindow = "10:00-11:00".parse().unwrap();
///
/// // Abutting windows do not overlap
/// assert!(!morning.overlaps(&later));
/// assert_eq!(morning.duration().num_minutes(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowRepr", into = "WindowRepr")]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Creates a window, rejecting empty and inverted intervals.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWindowError`] if `start >= end` or either end has a
    /// fractional second.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, InvalidWindowError> {
        for time in [start, end] {
            if time.nanosecond() != 0 {
                return Err(InvalidWindowError {
                    reason: format!(
                        "{} has a fractional second; windows are whole seconds",
                        time.format("%H:%M:%S%.f")
                    ),
                });
            }
        }
        if start >= end {
            return Err(InvalidWindowError {
                reason: format!(
                    "start {} must be before end {}",
                    format_time(start),
                    format_time(end)
                ),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a window of `minutes` length beginning at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWindowError`] if `minutes` is zero or the window
    /// would run past midnight.
    pub fn starting_at(start: NaiveTime, minutes: u32) -> Result<Self, InvalidWindowError> {
        let (end, wrapped) = start.overflowing_add_signed(Duration::minutes(i64::from(minutes)));
        if wrapped != 0 {
            return Err(InvalidWindowError {
                reason: format!(
                    "{minutes} minute window from {} runs past midnight",
                    format_time(start)
                ),
            });
        }
        Self::new(start, end)
    }

    /// Start of the window (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// End of the window (exclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of the window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns `true` if the two windows share any instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns `true` if `other` lies entirely inside this window.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Start as seconds since midnight, the store representation.
    #[must_use]
    pub fn start_secs(&self) -> u32 {
        self.start.num_seconds_from_midnight()
    }

    /// End as seconds since midnight, the store representation.
    #[must_use]
    pub fn end_secs(&self) -> u32 {
        self.end.num_seconds_from_midnight()
    }

    /// Rebuilds a window from stored seconds-since-midnight.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWindowError`] if either value is not a time of day or
    /// the window is empty.
    pub fn from_secs(start: u32, end: u32) -> Result<Self, InvalidWindowError> {
        let to_time = |secs: u32| {
            NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).ok_or_else(|| {
                InvalidWindowError {
                    reason: format!("{secs} is not a valid second of the day"),
                }
            })
        };
        Self::new(to_time(start)?, to_time(end)?)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_time(self.start), format_time(self.end))
    }
}

impl FromStr for TimeWindow {
    type Err = InvalidWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('-').ok_or_else(|| InvalidWindowError {
            reason: format!("expected START-END, got '{s}'"),
        })?;
        Self::new(parse_time(start)?, parse_time(end)?)
    }
}

/// Parses a wall-clock time as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns [`InvalidWindowError`] if the input matches neither form.
pub fn parse_time(s: &str) -> Result<NaiveTime, InvalidWindowError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| InvalidWindowError {
            reason: format!("'{s}' is not a time (expected HH:MM or HH:MM:SS)"),
        })
}

/// Formats a time as `HH:MM`, or `HH:MM:SS` when seconds are present.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

#[derive(Serialize, Deserialize)]
struct WindowRepr {
    start: String,
    end: String,
}

impl TryFrom<WindowRepr> for TimeWindow {
    type Error = InvalidWindowError;

    fn try_from(repr: WindowRepr) -> Result<Self, Self::Error> {
        Self::new(parse_time(&repr.start)?, parse_time(&repr.end)?)
    }
}

impl From<TimeWindow> for WindowRepr {
    fn from(window: TimeWindow) -> Self {
        Self {
            start: format_time(window.start),
            end: format_time(window.end),
        }
    }
}

/// Error type for invalid time windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWindowError {
    /// The reason the window is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time window: {}", self.reason)
    }
}

impl std::error::Error for InvalidWindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn w(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
        TimeWindow::new(t(start.0, start.1), t(end.0, end.1)).unwrap()
    }

    #[test]
    fn test_rejects_empty_and_inverted() {
        assert!(TimeWindow::new(t(10, 0), t(10, 0)).is_err());
        let err = TimeWindow::new(t(11, 0), t(10, 0)).unwrap_err();
        assert!(err.reason.contains("11:00"));
    }

    #[test]
    fn test_rejects_fractional_seconds() {
        let late = NaiveTime::from_hms_milli_opt(9, 0, 0, 900).unwrap();
        let err = TimeWindow::new(t(8, 0), late).unwrap_err();
        assert!(err.reason.contains("09:00:00.900"), "{}", err.reason);

        let early = NaiveTime::from_hms_milli_opt(11, 0, 0, 100).unwrap();
        let later = NaiveTime::from_hms_milli_opt(11, 0, 0, 800).unwrap();
        assert!(TimeWindow::new(early, later).is_err());

        assert!(TimeWindow::starting_at(early, 30).is_err());
    }

    #[test]
    fn test_latest_end_is_last_second_of_day() {
        let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        let window = TimeWindow::new(t(23, 0), last).unwrap();
        assert_eq!(window.end_secs(), 86_399);
        assert_eq!(window.to_string(), "23:00-23:59:59");

        // Reaching midnight wraps and is rejected
        assert!(TimeWindow::starting_at(t(23, 30), 30).is_err());
        assert!(TimeWindow::starting_at(t(23, 30), 29).is_ok());
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = w((10, 0), (11, 0));
        assert!(!a.overlaps(&w((11, 0), (12, 0))));
        assert!(!a.overlaps(&w((9, 0), (10, 0))));
        assert!(a.overlaps(&w((10, 30), (11, 30))));
        assert!(a.overlaps(&w((9, 0), (12, 0))));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_contains() {
        let day = w((8, 0), (20, 0));
        assert!(day.contains(&w((8, 0), (9, 0))));
        assert!(day.contains(&day));
        assert!(!day.contains(&w((19, 0), (21, 0))));
    }

    #[test]
    fn test_starting_at() {
        let window = TimeWindow::starting_at(t(9, 0), 60).unwrap();
        assert_eq!(window, w((9, 0), (10, 0)));
        assert!(TimeWindow::starting_at(t(23, 30), 60).is_err());
        assert!(TimeWindow::starting_at(t(9, 0), 0).is_err());
    }

    #[test]
    fn test_display_and_parse() {
        let window: TimeWindow = "09:00-10:30".parse().unwrap();
        assert_eq!(window.to_string(), "09:00-10:30");
        assert_eq!(window.duration().num_minutes(), 90);

        let precise: TimeWindow = "09:00:15-10:00".parse().unwrap();
        assert_eq!(precise.to_string(), "09:00:15-10:00");

        assert!("0900-1000".parse::<TimeWindow>().is_err());
        assert!("09:00".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_secs_roundtrip() {
        let window = w((9, 0), (10, 0));
        assert_eq!(window.start_secs(), 9 * 3600);
        assert_eq!(window.end_secs(), 10 * 3600);
        assert_eq!(
            TimeWindow::from_secs(window.start_secs(), window.end_secs()).unwrap(),
            window
        );
        assert!(TimeWindow::from_secs(0, 90_000).is_err());
    }

    #[test]
    fn test_serde_rejects_inverted() {
        let ok: TimeWindow = serde_yaml::from_str("start: \"09:00\"\nend: \"10:00\"\n").unwrap();
        assert_eq!(ok, w((9, 0), (10, 0)));
        let bad: Result<TimeWindow, _> = serde_yaml::from_str("start: \"10:00\"\nend: \"09:00\"\n");
        assert!(bad.is_err());
    }
}
