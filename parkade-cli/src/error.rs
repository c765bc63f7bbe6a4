//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use parkade::{Error as LibError, ErrorKind};
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock or for the request deadline.
    Timeout(String),

    /// Data directory not found (and auto-init disabled).
    NoDataDirectory,

    /// Configuration error.
    Config(String),

    /// Semantic failure (e.g., slot taken) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (slot unavailable, payment failed)
    /// - 2: Timeout waiting for database lock or deadline
    /// - 3: No data directory found
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    /// - 8: Lot, floor, spot, account, car or reservation not found
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err.kind() {
                ErrorKind::SlotUnavailable
                | ErrorKind::InsufficientFunds
                | ErrorKind::PaymentFailed => 1,
                ErrorKind::NotFound => 8,
                ErrorKind::Invalid => 4,
                ErrorKind::Persistence => 6,
            },
            CliError::Timeout(_) => 2,
            CliError::NoDataDirectory => 3,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout(msg) => write!(f, "Timeout: {msg}"),
            CliError::NoDataDirectory => {
                write!(
                    f,
                    "Data directory not found (run `parkade init` or enable auto-init)"
                )
            }
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::LockTimeout { .. } | LibError::DeadlineExceeded => {
                CliError::Timeout(e.to_string())
            }
            LibError::DataDirectoryNotFound { .. } => CliError::NoDataDirectory,
            LibError::Io(io) => CliError::Io(io),
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Io(std::io::Error::other(e))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use parkade::{Amount, PaymentFailureReason, SpotId};

    #[test]
    fn test_exit_codes_follow_error_kind() {
        let slot = LibError::SlotUnavailable {
            spot_id: SpotId::new(1),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            window: "09:00-10:00".parse().unwrap(),
            conflicting: None,
        };
        assert_eq!(CliError::from(slot).exit_code(), 1);

        let payment = LibError::PaymentFailed {
            reason: PaymentFailureReason::InsufficientFunds {
                balance: Amount::from_cents(100),
                requested: Amount::from_cents(200),
            },
        };
        assert_eq!(CliError::from(payment).exit_code(), 1);

        let missing = LibError::NotFound {
            resource: "lot 9".into(),
        };
        assert_eq!(CliError::from(missing).exit_code(), 8);

        let invalid = LibError::Validation {
            field: "amount".into(),
            message: "bad".into(),
        };
        assert_eq!(CliError::from(invalid).exit_code(), 4);
    }

    #[test]
    fn test_lock_errors_are_timeouts() {
        assert_eq!(
            CliError::from(LibError::LockTimeout { seconds: 5 }).exit_code(),
            2
        );
        assert_eq!(CliError::from(LibError::DeadlineExceeded).exit_code(), 2);
    }

    #[test]
    fn test_io_errors_unwrap() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(CliError::from(LibError::Io(io)).exit_code(), 5);
    }
}
