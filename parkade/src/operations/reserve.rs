//! The reservation workflow.
//!
//! A request is checked and committed inside one IMMEDIATE transaction:
//! validate, resolve the spot and car, re-check availability, take payment,
//! insert, then commit. Every error exit drops the transaction, so a failed
//! request leaves neither a reservation row nor a debit behind.

use std::fmt;
use std::time::{Duration, Instant, SystemTime};

use chrono::NaiveDate;
use rusqlite::Transaction;

use crate::amount::Amount;
use crate::config::Config;
use crate::database::{lock_aware, Database, NewReservation};
use crate::error::{Error, ErrorKind, PaymentFailureReason, Result};
use crate::inventory::{AccountId, CarId, FloorId, LotId, PriceTarget};
use crate::reservation::{PaymentMode, Reservation, ReservationId};
use crate::window::TimeWindow;

/// A request to reserve one spot for one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveRequest {
    /// The authenticated account making the request.
    pub account_id: AccountId,
    /// The car to park; must belong to the account.
    pub car_id: CarId,
    /// The lot.
    pub lot_id: LotId,
    /// The floor within the lot.
    pub floor_id: FloorId,
    /// The spot number on the floor.
    pub spot_number: u32,
    /// The reserved date.
    pub date: NaiveDate,
    /// The reserved window.
    pub window: TimeWindow,
    /// How the reservation is paid.
    pub payment_mode: PaymentMode,
    /// An explicit price. When `None` the spot's effective price is charged.
    pub price: Option<Amount>,
    /// Point in time after which the request must not commit.
    pub deadline: Option<Instant>,
}

impl ReserveRequest {
    /// Creates a request paid online at the spot's effective price, with no
    /// deadline.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use parkade::operations::ReserveRequest;
    /// use parkade::{AccountId, CarId, FloorId, LotId, PaymentMode, TimeWindow};
    ///
    /// let request = ReserveRequest::new(
    ///     AccountId::new(1),
    ///     CarId::new(1),
    ///     LotId::new(1),
    ///     FloorId::new(1),
    ///     3,
    ///     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    ///     "09:00-10:00".parse::<TimeWindow>().unwrap(),
    /// )
    /// .with_payment_mode(PaymentMode::Wallet);
    ///
    /// assert!(request.price.is_none());
    /// ```
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        account_id: AccountId,
        car_id: CarId,
        lot_id: LotId,
        floor_id: FloorId,
        spot_number: u32,
        date: NaiveDate,
        window: TimeWindow,
    ) -> Self {
        Self {
            account_id,
            car_id,
            lot_id,
            floor_id,
            spot_number,
            date,
            window,
            payment_mode: PaymentMode::Online,
            price: None,
            deadline: None,
        }
    }

    /// Sets the payment mode.
    #[must_use]
    pub const fn with_payment_mode(mut self, payment_mode: PaymentMode) -> Self {
        self.payment_mode = payment_mode;
        self
    }

    /// Sets an explicit price.
    #[must_use]
    pub const fn with_price(mut self, price: Option<Amount>) -> Self {
        self.price = price;
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the deadline to `timeout` from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now().checked_add(timeout))
    }
}

/// Limits applied to every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservePolicy {
    /// Longest window that can be reserved, in minutes.
    pub max_window_minutes: Option<u32>,
    /// Reject windows outside the lot's operating hours.
    pub enforce_operating_hours: bool,
}

impl ReservePolicy {
    /// Reads the policy from a resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_window_minutes: config.max_window_minutes(),
            enforce_operating_hours: config.enforce_operating_hours(),
        }
    }
}

/// Terminal state of one request, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// The reservation was committed.
    Committed(ReservationId),
    /// The slot was already taken.
    Unavailable,
    /// The wallet could not pay.
    InsufficientFunds,
    /// The request failed for another reason.
    Failed(ErrorKind),
}

impl ReserveOutcome {
    /// Classifies the result of [`reserve`].
    #[must_use]
    pub fn of(result: &Result<Reservation>) -> Self {
        match result {
            Ok(reservation) => Self::Committed(reservation.id()),
            Err(err) => {
                if err.is_insufficient_funds() {
                    Self::InsufficientFunds
                } else {
                    match err.kind() {
                        ErrorKind::SlotUnavailable => Self::Unavailable,
                        kind => Self::Failed(kind),
                    }
                }
            }
        }
    }
}

impl fmt::Display for ReserveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Committed(id) => write!(f, "committed as reservation {id}"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::InsufficientFunds => write!(f, "insufficient funds"),
            Self::Failed(kind) => write!(f, "failed ({kind})"),
        }
    }
}

/// Reserves a spot.
///
/// # Errors
///
/// - [`Error::InvalidWindow`] if the policy rejects the window
/// - [`Error::SpotNotFound`] if the spot number does not exist on the floor
/// - [`Error::CarNotFound`] if the car does not exist or belongs to another
///   account
/// - [`Error::SlotUnavailable`] if the window overlaps a committed
///   reservation
/// - [`Error::PaymentFailed`] if a wallet payment cannot be covered
/// - [`Error::LockTimeout`] or [`Error::DeadlineExceeded`] if the request
///   ran out of time
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use parkade::operations::{reserve, ReservePolicy, ReserveRequest};
/// use parkade::{AccountId, CarId, Database, DatabaseConfig, FloorId, LotId, PaymentMode};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/parkade.db")).unwrap();
/// let request = ReserveRequest::new(
///     AccountId::new(1),
///     CarId::new(1),
///     LotId::new(1),
///     FloorId::new(1),
///     3,
///     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
///     "09:00-10:00".parse().unwrap(),
/// )
/// .with_payment_mode(PaymentMode::Wallet);
///
/// let reservation = reserve(&mut db, &request, &ReservePolicy::default()).unwrap();
/// println!("reserved {}", reservation.id());
/// ```
pub fn reserve(
    db: &mut Database,
    request: &ReserveRequest,
    policy: &ReservePolicy,
) -> Result<Reservation> {
    log::debug!(
        "reserve: account {} spot {} on floor {} of lot {}, {} {}",
        request.account_id,
        request.spot_number,
        request.floor_id,
        request.lot_id,
        request.date,
        request.window
    );

    let result = reserve_with_deadline(db, request, policy);

    let outcome = ReserveOutcome::of(&result);
    match outcome {
        ReserveOutcome::Committed(_) => log::info!("reserve {outcome}"),
        _ => log::warn!("reserve {outcome}"),
    }
    result
}

fn reserve_with_deadline(
    db: &mut Database,
    request: &ReserveRequest,
    policy: &ReservePolicy,
) -> Result<Reservation> {
    let configured = db.busy_timeout();
    let wait = match request.deadline {
        Some(deadline) => {
            let remaining = deadline
                .checked_duration_since(Instant::now())
                .filter(|d| !d.is_zero())
                .ok_or(Error::DeadlineExceeded)?;
            remaining.min(configured)
        }
        None => configured,
    };

    if wait != configured {
        db.set_busy_timeout(wait)?;
    }
    let result = run_transaction(db, request, policy, wait);
    if wait == configured {
        return result;
    }
    let reset = db.reset_busy_timeout();
    settle(result, reset)
}

/// The transaction's result wins over a failed busy timeout reset: a
/// committed reservation is never reported as an error.
fn settle(result: Result<Reservation>, reset: Result<()>) -> Result<Reservation> {
    if let Err(e) = reset {
        log::warn!("could not restore busy timeout: {e}");
    }
    result
}

fn run_transaction(
    db: &mut Database,
    request: &ReserveRequest,
    policy: &ReservePolicy,
    wait: Duration,
) -> Result<Reservation> {
    let tx = db.begin_immediate().map_err(|e| match e {
        // Lowered waits report the time actually waited.
        Error::LockTimeout { .. } => Error::LockTimeout {
            seconds: wait.as_secs() + u64::from(wait.subsec_nanos() > 0),
        },
        other => other,
    })?;

    let reservation = reserve_in(&tx, request, policy)?;

    if request.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
        return Err(Error::DeadlineExceeded);
    }

    tx.commit().map_err(|e| lock_aware(e, wait))?;
    Ok(reservation)
}

fn reserve_in(
    tx: &Transaction<'_>,
    request: &ReserveRequest,
    policy: &ReservePolicy,
) -> Result<Reservation> {
    validate_window(tx, request, policy)?;

    let spot = Database::resolve_spot(tx, request.lot_id, request.floor_id, request.spot_number)?;

    let car = match Database::get_car(tx, request.car_id) {
        Ok(car) if car.account_id == request.account_id => car,
        Ok(_) | Err(Error::NotFound { .. }) => {
            return Err(Error::CarNotFound {
                car_id: request.car_id,
                account_id: request.account_id,
            })
        }
        Err(e) => return Err(e),
    };

    if let Some(conflicting) =
        Database::find_conflict(tx, spot.id, request.date, &request.window)?
    {
        return Err(Error::SlotUnavailable {
            spot_id: spot.id,
            date: request.date,
            window: request.window,
            conflicting: Some(conflicting),
        });
    }

    let price = match request.price {
        Some(price) => price,
        None => Database::get_spot_price(tx, PriceTarget::Spot(spot.id))?,
    };

    if request.payment_mode == PaymentMode::Wallet {
        Database::debit_simple(tx, request.account_id, price).map_err(|e| match e {
            Error::InsufficientFunds {
                balance, requested, ..
            } => Error::PaymentFailed {
                reason: PaymentFailureReason::InsufficientFunds { balance, requested },
            },
            other => other,
        })?;
    }

    Database::insert_reservation(
        tx,
        &NewReservation {
            account_id: request.account_id,
            car_id: car.id,
            spot_id: spot.id,
            plate: &car.plate,
            date: request.date,
            window: request.window,
            price,
            payment_mode: request.payment_mode,
            created_at: SystemTime::now(),
        },
    )
}

fn validate_window(
    tx: &Transaction<'_>,
    request: &ReserveRequest,
    policy: &ReservePolicy,
) -> Result<()> {
    if let Some(max) = policy.max_window_minutes {
        let minutes = request.window.duration().num_minutes();
        if minutes > i64::from(max) {
            return Err(Error::InvalidWindow {
                reason: format!(
                    "window {} lasts {minutes} minutes, longer than the {max} minute limit",
                    request.window
                ),
            });
        }
    }

    if policy.enforce_operating_hours {
        let lot = Database::get_lot(tx, request.lot_id)?;
        if !lot.is_open_during(&request.window) {
            return Err(Error::InvalidWindow {
                reason: format!(
                    "window {} is outside the operating hours of lot '{}'",
                    request.window, lot.name
                ),
            });
        }
    }

    Ok(())
}
