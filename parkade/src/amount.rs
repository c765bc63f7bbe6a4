//! Money amounts in integer minor units.
//!
//! Balances and prices are held as whole cents so that the wallet
//! non-negativity invariant can be checked exactly.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative amount of money, in cents.
///
/// # Examples
///
/// ```
/// use parkade::Amount;
///
/// let price: Amount = "12.50".parse().unwrap();
/// assert_eq!(price.cents(), 1250);
/// assert_eq!(price.to_string(), "12.50");
///
/// // Negative amounts are rejected
/// assert!("-1".parse::<Amount>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(u64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// The largest amount that fits in a store column.
    #[allow(clippy::cast_sign_loss)]
    pub const MAX: Self = Self(i64::MAX as u64);

    /// Creates an amount from a number of cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the number of cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow past [`Amount::MAX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::Amount;
    ///
    /// let a = Amount::from_cents(150);
    /// assert_eq!(a.checked_add(Amount::from_cents(50)), Some(Amount::from_cents(200)));
    /// assert_eq!(Amount::MAX.checked_add(Amount::from_cents(1)), None);
    /// ```
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .filter(|sum| *sum <= Self::MAX.0)
            .map(Self)
    }

    /// Subtracts `other`, returning `None` if the result would be negative.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Amount {
    type Err = InvalidAmountError;

    /// Parses `"12"`, `"12.5"` or `"12.50"`. More than two fraction digits
    /// are rejected rather than rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| InvalidAmountError {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid("amount is empty"));
        }
        if trimmed.starts_with('-') {
            return Err(invalid("amount must not be negative"));
        }

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected at most two fraction digits"));
        }

        let whole: u64 = whole.parse().map_err(|_| invalid("amount is too large"))?;
        let fraction_cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid("bad fraction"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("bad fraction"))?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .filter(|c| *c <= Self::MAX.0)
            .map(Self)
            .ok_or_else(|| invalid("amount is too large"))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    /// Accepts either a decimal string (`"12.50"`) or a whole number of units
    /// (`12`).
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Units(u64),
            Text(String),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Units(units) => units
                .checked_mul(100)
                .filter(|c| *c <= Self::MAX.0)
                .map(Self)
                .ok_or_else(|| D::Error::custom(format!("amount {units} is too large"))),
            Helper::Text(text) => text.parse().map_err(D::Error::custom),
        }
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let cents = i64::try_from(self.0)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(ToSqlOutput::from(cents))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let cents = i64::column_result(value)?;
        u64::try_from(cents)
            .map(Self)
            .map_err(|_| FromSqlError::OutOfRange(cents))
    }
}

/// Error type for invalid money amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAmountError {
    /// The rejected input.
    pub value: String,
    /// The reason it was rejected.
    pub reason: String,
}

impl fmt::Display for InvalidAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid amount '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidAmountError {}
