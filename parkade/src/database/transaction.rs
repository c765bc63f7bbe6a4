//! Transaction management utilities.
//!
//! Every write path begins with `BEGIN IMMEDIATE`, taking the database write
//! lock before its first read. A concurrent writer waits up to the busy
//! timeout and then fails with [`Error::LockTimeout`].

use std::time::Duration;

use rusqlite::{ErrorCode, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

/// Returns `true` if the error means the write lock could not be taken.
pub(crate) fn is_lock_contention(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    )
}

/// Converts a store error, turning lock contention into
/// [`Error::LockTimeout`].
pub(crate) fn lock_aware(err: rusqlite::Error, waited: Duration) -> Error {
    if is_lock_contention(&err) {
        // Round up so a sub-second wait never reports zero seconds.
        Error::LockTimeout {
            seconds: waited.as_secs() + u64::from(waited.subsec_nanos() > 0),
        }
    } else {
        Error::Database(err)
    }
}

impl Database {
    /// Begins an IMMEDIATE transaction.
    ///
    /// The returned transaction rolls back when dropped without
    /// [`Transaction::commit`], so every `?` exit leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer holds the lock for
    /// longer than the busy timeout.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        let waited = self.busy_timeout();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_aware(e, waited))
    }

    /// Runs `f` inside an IMMEDIATE transaction and commits its result.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or a lock or commit failure.
    pub fn with_immediate<T>(
        &mut self,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let waited = self.busy_timeout();
        let tx = self.begin_immediate()?;
        let value = f(&tx)?;
        tx.commit().map_err(|e| lock_aware(e, waited))?;
        Ok(value)
    }
}
