//! Reservation types.
//!
//! A [`Reservation`] binds one spot, on one date, for one half-open
//! [`TimeWindow`], to an account and car. Reservations are created only by
//! the allocation engine and are immutable once committed.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::inventory::{id_type, AccountId, CarId, LotId, SpotId};
use crate::window::TimeWindow;

id_type!(
    /// Identifier of a [`Reservation`].
    ReservationId,
    "reservation"
);

/// How a reservation is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Paid through an external gateway; the wallet is not touched.
    Online,
    /// Debited from the account's wallet in the reserve transaction.
    Wallet,
}

impl PaymentMode {
    /// Store and CLI spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Wallet => "wallet",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "wallet" => Ok(Self::Wallet),
            other => Err(format!("unknown payment mode '{other}' (expected online or wallet)")),
        }
    }
}

/// A committed reservation of one spot.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use parkade::{AccountId, Amount, CarId, PaymentMode, Reservation, ReservationId, SpotId};
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let window = "09:00-10:00".parse().unwrap();
///
/// let reservation = Reservation::builder(ReservationId::new(1), SpotId::new(3), date, window)
///     .account(AccountId::new(1))
///     .car(CarId::new(1))
///     .plate("12A345")
///     .price(Amount::from_cents(2000))
///     .payment_mode(PaymentMode::Wallet)
///     .build()
///     .unwrap();
///
/// assert_eq!(reservation.spot_id(), SpotId::new(3));
/// assert_eq!(reservation.window().to_string(), "09:00-10:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    account_id: AccountId,
    car_id: CarId,
    spot_id: SpotId,
    plate: String,
    date: NaiveDate,
    window: TimeWindow,
    price: Amount,
    payment_mode: PaymentMode,
    created_at: SystemTime,
}

impl Reservation {
    /// Creates a new reservation builder.
    #[must_use]
    pub fn builder(
        id: ReservationId,
        spot_id: SpotId,
        date: NaiveDate,
        window: TimeWindow,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id,
            spot_id,
            date,
            window,
            account_id: None,
            car_id: None,
            plate: String::new(),
            price: Amount::ZERO,
            payment_mode: PaymentMode::Online,
            created_at: None,
        }
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the reserving account.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Returns the reserved car.
    #[must_use]
    pub const fn car_id(&self) -> CarId {
        self.car_id
    }

    /// Returns the reserved spot.
    #[must_use]
    pub const fn spot_id(&self) -> SpotId {
        self.spot_id
    }

    /// Returns the plate snapshot taken when the reservation was made.
    #[must_use]
    pub fn plate(&self) -> &str {
        &self.plate
    }

    /// Returns the reserved date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the reserved window.
    #[must_use]
    pub const fn window(&self) -> TimeWindow {
        self.window
    }

    /// Returns the price charged.
    #[must_use]
    pub const fn price(&self) -> Amount {
        self.price
    }

    /// Returns how the reservation was paid for.
    #[must_use]
    pub const fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Returns `true` if this reservation occupies the spot at any instant of
    /// `window` on `date`.
    #[must_use]
    pub fn conflicts_with(&self, date: NaiveDate, window: &TimeWindow) -> bool {
        self.date == date && self.window.overlaps(window)
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: ReservationId,
    spot_id: SpotId,
    date: NaiveDate,
    window: TimeWindow,
    account_id: Option<AccountId>,
    car_id: Option<CarId>,
    plate: String,
    price: Amount,
    payment_mode: PaymentMode,
    created_at: Option<SystemTime>,
}

impl ReservationBuilder {
    /// Sets the reserving account.
    #[must_use]
    pub const fn account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Sets the reserved car.
    #[must_use]
    pub const fn car(mut self, car_id: CarId) -> Self {
        self.car_id = Some(car_id);
        self
    }

    /// Sets the plate snapshot. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = plate.into().trim().to_string();
        self
    }

    /// Sets the price charged.
    #[must_use]
    pub const fn price(mut self, price: Amount) -> Self {
        self.price = price;
        self
    }

    /// Sets the payment mode.
    #[must_use]
    pub const fn payment_mode(mut self, payment_mode: PaymentMode) -> Self {
        self.payment_mode = payment_mode;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the account or car is missing, or the
    /// plate is empty.
    pub fn build(self) -> crate::Result<Reservation> {
        let account_id = self.account_id.ok_or_else(|| missing("account_id"))?;
        let car_id = self.car_id.ok_or_else(|| missing("car_id"))?;
        if self.plate.is_empty() {
            return Err(crate::Error::Validation {
                field: "plate".into(),
                message: "plate must be non-empty after trimming whitespace".into(),
            });
        }

        Ok(Reservation {
            id: self.id,
            account_id,
            car_id,
            spot_id: self.spot_id,
            plate: self.plate,
            date: self.date,
            window: self.window,
            price: self.price,
            payment_mode: self.payment_mode,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
        })
    }
}

fn missing(field: &str) -> crate::Error {
    crate::Error::Validation {
        field: field.to_string(),
        message: "is required".to_string(),
    }
}

/// A reservation joined with the names a person reads in a history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetail {
    /// Reservation id.
    pub id: ReservationId,
    /// Lot the spot belongs to.
    pub lot_id: LotId,
    /// Lot display name.
    pub lot_name: String,
    /// Floor number within the lot.
    pub floor_number: u32,
    /// Spot number within the floor.
    pub spot_number: u32,
    /// Reserved date.
    pub date: NaiveDate,
    /// Reserved window.
    pub window: TimeWindow,
    /// Plate snapshot.
    pub plate: String,
    /// Price charged.
    pub price: Amount,
    /// Payment mode.
    pub payment_mode: PaymentMode,
}
