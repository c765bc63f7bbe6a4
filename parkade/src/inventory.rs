//! Inventory model: lots, floors, spots, accounts and cars.
//!
//! These records are read-only to the allocation engine. They are created by
//! the catalog import and looked up through [`crate::Database`].

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::window::TimeWindow;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw store id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw store id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Human-readable resource label used in not-found messages.
            #[allow(dead_code)]
            pub(crate) fn describe(self) -> String {
                format!(concat!($label, " {}"), self.0)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl ::rusqlite::types::ToSql for $name {
            fn to_sql(&self) -> ::rusqlite::Result<::rusqlite::types::ToSqlOutput<'_>> {
                Ok(::rusqlite::types::ToSqlOutput::from(self.0))
            }
        }

        impl ::rusqlite::types::FromSql for $name {
            fn column_result(
                value: ::rusqlite::types::ValueRef<'_>,
            ) -> ::rusqlite::types::FromSqlResult<Self> {
                <i64 as ::rusqlite::types::FromSql>::column_result(value).map(Self)
            }
        }
    };
}

pub(crate) use id_type;

id_type!(
    /// Identifier of an [`Account`].
    AccountId,
    "account"
);
id_type!(
    /// Identifier of a [`Car`].
    CarId,
    "car"
);
id_type!(
    /// Identifier of a [`Lot`].
    LotId,
    "lot"
);
id_type!(
    /// Identifier of a [`Floor`].
    FloorId,
    "floor"
);
id_type!(
    /// Identifier of a [`Spot`].
    SpotId,
    "spot"
);

/// A parking facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    /// Store id.
    pub id: LotId,
    /// Display name.
    pub name: String,
    /// Declared capacity of the whole lot.
    pub capacity: u32,
    /// Opening time of day.
    pub open_time: NaiveTime,
    /// Closing time of day.
    pub close_time: NaiveTime,
    /// First geocoordinate, free-form.
    pub node1: String,
    /// Second geocoordinate, free-form.
    pub node2: String,
    /// Default price for spots without their own price.
    pub price: Amount,
}

impl Lot {
    /// Returns the operating hours as a window, or `None` when the lot is
    /// open around the clock (opening and closing times are equal) or closes
    /// after midnight.
    #[must_use]
    pub fn operating_window(&self) -> Option<TimeWindow> {
        TimeWindow::new(self.open_time, self.close_time).ok()
    }

    /// Returns `true` if the lot is open for the whole of `window`.
    #[must_use]
    pub fn is_open_during(&self, window: &TimeWindow) -> bool {
        if self.open_time == self.close_time {
            return true;
        }
        match self.operating_window() {
            Some(hours) => hours.contains(window),
            // Closes after midnight: open from `open_time` to the end of the
            // day and from midnight to `close_time`.
            None => window.start() >= self.open_time || window.end() <= self.close_time,
        }
    }
}

/// Short listing entry for a lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSummary {
    /// Store id.
    pub id: LotId,
    /// Display name.
    pub name: String,
}

/// A level of a lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    /// Store id.
    pub id: FloorId,
    /// Owning lot.
    pub lot_id: LotId,
    /// Floor number, unique within the lot.
    pub number: u32,
}

/// An individually reservable parking space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    /// Store id.
    pub id: SpotId,
    /// Owning lot.
    pub lot_id: LotId,
    /// Owning floor.
    pub floor_id: FloorId,
    /// Spot number, unique within the floor.
    pub number: u32,
    /// Spot-specific price overriding the lot price.
    pub price: Option<Amount>,
}

/// A user account. Credentials are held by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store id.
    pub id: AccountId,
    /// Full name.
    pub full_name: String,
    /// Phone number, unique across accounts.
    pub phone_number: String,
}

/// A car registered to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Store id.
    pub id: CarId,
    /// Owning account.
    pub account_id: AccountId,
    /// Car model.
    pub model: String,
    /// License plate.
    pub plate: String,
    /// Color.
    pub color: String,
}

/// What to look up a price for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTarget {
    /// Effective price of a spot: its own price, else its lot's.
    Spot(SpotId),
    /// Default price of a lot.
    Lot(LotId),
}
