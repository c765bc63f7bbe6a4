//! Wallet ledger.
//!
//! The balance never goes negative. Debits are a single conditional update
//! whose affected-row count decides success; there is no read-check-write.

use rusqlite::{params, Connection, OptionalExtension};

use crate::amount::Amount;
use crate::error::{Error, Result};
use crate::inventory::AccountId;

use super::connection::Database;
use super::schema::{CREDIT_WALLET, DEBIT_WALLET};

const SELECT_BALANCE: &str = "SELECT balance FROM wallets WHERE account_id = ?";

fn wallet_not_found(account_id: AccountId) -> Error {
    Error::not_found(format!("wallet for account {account_id}"))
}

impl Database {
    /// Returns an account's wallet balance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the account has no wallet.
    pub fn get_balance(conn: &Connection, account_id: AccountId) -> Result<Amount> {
        conn.query_row(SELECT_BALANCE, [account_id], |row| row.get(0))
            .optional()?
            .ok_or_else(|| wallet_not_found(account_id))
    }

    /// Debits a wallet using an existing connection or transaction and
    /// returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientFunds`] if the balance is lower than
    /// `amount`, leaving it unchanged, or [`Error::NotFound`] if the account
    /// has no wallet.
    pub fn debit_simple(
        conn: &Connection,
        account_id: AccountId,
        amount: Amount,
    ) -> Result<Amount> {
        let updated: Option<Amount> = conn
            .query_row(DEBIT_WALLET, params![amount, account_id], |row| row.get(0))
            .optional()
            .map_err(|e| constraint_as_insufficient(e, conn, account_id, amount))?;

        match updated {
            Some(balance) => Ok(balance),
            None => {
                // No row matched: either no wallet, or the guard rejected it.
                let balance = Self::get_balance(conn, account_id)?;
                Err(Error::InsufficientFunds {
                    account_id,
                    balance,
                    requested: amount,
                })
            }
        }
    }

    /// Credits a wallet using an existing connection or transaction and
    /// returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the account has no wallet, or
    /// [`Error::Validation`] if the balance would overflow.
    pub fn credit_simple(
        conn: &Connection,
        account_id: AccountId,
        amount: Amount,
    ) -> Result<Amount> {
        let ceiling = Amount::MAX.checked_sub(amount).unwrap_or(Amount::ZERO);
        let updated: Option<Amount> = conn
            .query_row(CREDIT_WALLET, params![amount, account_id, ceiling], |row| {
                row.get(0)
            })
            .optional()?;

        match updated {
            Some(balance) => Ok(balance),
            None => {
                let balance = Self::get_balance(conn, account_id)?;
                Err(Error::Validation {
                    field: "amount".into(),
                    message: format!("crediting {amount} to balance {balance} would overflow"),
                })
            }
        }
    }

    /// Debits a wallet in its own IMMEDIATE transaction.
    ///
    /// # Errors
    ///
    /// As [`Database::debit_simple`], plus [`Error::LockTimeout`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parkade::database::{Database, DatabaseConfig};
    /// use parkade::{AccountId, Amount};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/parkade.db")).unwrap();
    /// match db.debit(AccountId::new(1), Amount::from_cents(2000)) {
    ///     Ok(balance) => println!("new balance {balance}"),
    ///     Err(e) if e.is_insufficient_funds() => println!("not enough money"),
    ///     Err(e) => panic!("{e}"),
    /// }
    /// ```
    pub fn debit(&mut self, account_id: AccountId, amount: Amount) -> Result<Amount> {
        let balance = self.with_immediate(|tx| Self::debit_simple(tx, account_id, amount))?;
        log::info!("debited {amount} from account {account_id}, balance {balance}");
        Ok(balance)
    }

    /// Credits a wallet in its own IMMEDIATE transaction.
    ///
    /// # Errors
    ///
    /// As [`Database::credit_simple`], plus [`Error::LockTimeout`].
    pub fn credit(&mut self, account_id: AccountId, amount: Amount) -> Result<Amount> {
        let balance = self.with_immediate(|tx| Self::credit_simple(tx, account_id, amount))?;
        log::info!("credited {amount} to account {account_id}, balance {balance}");
        Ok(balance)
    }
}

/// The `CHECK (balance >= 0)` backstop surfaces as a constraint failure.
fn constraint_as_insufficient(
    err: rusqlite::Error,
    conn: &Connection,
    account_id: AccountId,
    amount: Amount,
) -> Error {
    if err.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
        match Database::get_balance(conn, account_id) {
            Ok(balance) => Error::InsufficientFunds {
                account_id,
                balance,
                requested: amount,
            },
            Err(e) => e,
        }
    } else {
        Error::Database(err)
    }
}
