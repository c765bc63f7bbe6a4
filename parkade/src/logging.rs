//! Logging infrastructure for the parkade library.
//!
//! The library logs through the [`log`] facade. [`Logger`] is a stderr
//! backend with three verbosity levels that front ends install with
//! [`init_logger`].

use std::env;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable consulted by [`init_logger`] when no flag is given.
pub const LOG_MODE_ENV: &str = "PARKADE_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use parkade::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all log output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Everything down to debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `quiet`, `normal` or `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` filter this level lets through.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }

    const fn to_u8(self) -> u8 {
        match self {
            Self::Quiet => 0,
            Self::Normal => 1,
            Self::Verbose => 2,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Quiet,
            1 => Self::Normal,
            _ => Self::Verbose,
        }
    }

    /// Picks the level from CLI flags, then the `PARKADE_LOG_MODE` value,
    /// then the default. `verbose` wins over `quiet`; an unparsable
    /// environment value is ignored.
    #[must_use]
    pub fn resolve(verbose: bool, quiet: bool, env_value: Option<&str>) -> Self {
        if verbose {
            return Self::Verbose;
        }
        if quiet {
            return Self::Quiet;
        }
        env_value
            .and_then(|value| Self::parse(value).ok())
            .unwrap_or(Self::Normal)
    }
}

/// A stderr logger.
///
/// # Examples
///
/// ```
/// use log::Log;
/// use parkade::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.enabled(&log::Metadata::builder().level(log::Level::Warn).build()));
/// assert!(!logger.enabled(&log::Metadata::builder().level(log::Level::Info).build()));
/// ```
#[derive(Debug)]
pub struct Logger {
    level: AtomicU8,
}

impl Logger {
    /// Creates a logger at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self {
            level: AtomicU8::new(level.to_u8()),
        }
    }

    /// Returns the current log level.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Changes the log level.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.to_u8(), Ordering::Relaxed);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level().filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: Logger = Logger::new(LogLevel::Normal);

/// Installs the stderr logger as the global `log` backend and returns the
/// chosen level.
///
/// The level comes from the flags, then `PARKADE_LOG_MODE`, then defaults to
/// [`LogLevel::Normal`]. Calling this again only changes the level.
///
/// # Examples
///
/// ```
/// use parkade::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, false), LogLevel::Verbose);
/// log::debug!("shown on stderr");
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> LogLevel {
    let env_value = env::var(LOG_MODE_ENV).ok();
    let level = LogLevel::resolve(verbose, quiet, env_value.as_deref());

    LOGGER.set_level(level);
    // Err when an earlier call or another backend already installed one
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level.filter());
    level
}
