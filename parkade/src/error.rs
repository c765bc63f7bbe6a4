//! Error types for the parkade library.
//!
//! This module provides the error hierarchy for every operation in the
//! library, using `thiserror` for ergonomic error handling. Each variant
//! maps onto a coarse [`ErrorKind`] that front ends use to pick a response.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::amount::Amount;
use crate::inventory::{AccountId, CarId, FloorId, LotId, SpotId};
use crate::reservation::ReservationId;
use crate::window::TimeWindow;

/// Result type alias for operations that may fail with a parkade error.
///
/// # Examples
///
/// ```
/// use parkade::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the parkade library.
#[derive(Debug, Error)]
pub enum Error {
    /// A lot, floor, account, wallet or reservation does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// No spot with the given number exists on the given lot floor.
    #[error("spot {spot_number} not found on floor {floor_id} of lot {lot_id}")]
    SpotNotFound {
        /// The lot that was searched.
        lot_id: LotId,
        /// The floor that was searched.
        floor_id: FloorId,
        /// The spot number that was requested.
        spot_number: u32,
    },

    /// The car does not exist or is not owned by the account.
    #[error("car {car_id} not found for account {account_id}")]
    CarNotFound {
        /// The requested car.
        car_id: CarId,
        /// The account that asked for it.
        account_id: AccountId,
    },

    /// The spot already has a reservation overlapping the requested window.
    #[error(
        "spot {spot_id} is unavailable on {date} during {window}{}",
        conflict_suffix(.conflicting)
    )]
    SlotUnavailable {
        /// The spot that was requested.
        spot_id: SpotId,
        /// The requested date.
        date: NaiveDate,
        /// The requested window.
        window: TimeWindow,
        /// The committed reservation that overlaps, when known.
        conflicting: Option<ReservationId>,
    },

    /// A wallet debit was rejected because the balance is too low.
    #[error("insufficient funds for account {account_id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The account whose wallet was debited.
        account_id: AccountId,
        /// The balance at the time of the attempt.
        balance: Amount,
        /// The amount that was requested.
        requested: Amount,
    },

    /// Payment for a reservation could not be taken.
    #[error("payment failed: {reason}")]
    PaymentFailed {
        /// Why the payment failed.
        reason: PaymentFailureReason,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The database write lock could not be acquired in time.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The request deadline expired before the transaction committed.
    #[error("request deadline exceeded before commit")]
    DeadlineExceeded,

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A money amount could not be parsed or is out of range.
    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount {
        /// The offending input.
        value: String,
        /// The reason it was rejected.
        reason: String,
    },

    /// A time window is empty, inverted or malformed.
    #[error("invalid time window: {reason}")]
    InvalidWindow {
        /// The reason the window is invalid.
        reason: String,
    },

    /// A configuration or catalog file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },
}

fn conflict_suffix(conflicting: &Option<ReservationId>) -> String {
    match conflicting {
        Some(id) => format!(" (conflicts with reservation {id})"),
        None => String::new(),
    }
}

/// Reason a reservation payment failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentFailureReason {
    /// The wallet balance was lower than the price.
    InsufficientFunds {
        /// The balance at the time of the attempt.
        balance: Amount,
        /// The price that was charged.
        requested: Amount,
    },
}

impl std::fmt::Display for PaymentFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientFunds { balance, requested } => {
                write!(f, "insufficient funds (balance {balance}, price {requested})")
            }
        }
    }
}

/// Coarse classification of [`Error`] values.
///
/// Every failure of a reservation request falls into exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced lot, floor, spot, car, account or wallet is missing.
    NotFound,
    /// The requested window overlaps an existing reservation.
    SlotUnavailable,
    /// A standalone wallet debit was rejected.
    InsufficientFunds,
    /// The reservation payment could not be taken.
    PaymentFailed,
    /// The store failed, timed out, or lost the commit.
    Persistence,
    /// The input or configuration was invalid.
    Invalid,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::SlotUnavailable => write!(f, "slot_unavailable"),
            Self::InsufficientFunds => write!(f, "insufficient_funds"),
            Self::PaymentFailed => write!(f, "payment_failed"),
            Self::Persistence => write!(f, "persistence"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

impl From<crate::amount::InvalidAmountError> for Error {
    fn from(err: crate::amount::InvalidAmountError) -> Self {
        Self::InvalidAmount {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl From<crate::window::InvalidWindowError> for Error {
    fn from(err: crate::window::InvalidWindowError) -> Self {
        Self::InvalidWindow { reason: err.reason }
    }
}

impl Error {
    /// Classifies this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::{Error, ErrorKind};
    ///
    /// let err = Error::DeadlineExceeded;
    /// assert_eq!(err.kind(), ErrorKind::Persistence);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::SpotNotFound { .. } | Self::CarNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::SlotUnavailable { .. } => ErrorKind::SlotUnavailable,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::PaymentFailed { .. } => ErrorKind::PaymentFailed,
            Self::Database(_)
            | Self::LockTimeout { .. }
            | Self::DeadlineExceeded
            | Self::UnsupportedSchemaVersion { .. }
            | Self::Io(_)
            | Self::DataDirectoryNotFound { .. } => ErrorKind::Persistence,
            Self::Validation { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidWindow { .. }
            | Self::Configuration(_) => ErrorKind::Invalid,
        }
    }

    /// Returns `true` if the error was caused by a low wallet balance,
    /// either from a standalone debit or inside a reservation payment.
    #[must_use]
    pub const fn is_insufficient_funds(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds { .. }
                | Self::PaymentFailed {
                    reason: PaymentFailureReason::InsufficientFunds { .. }
                }
        )
    }

    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}
