#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # parkade
//!
//! A library for reserving parking spots by date and time window, with
//! optional payment from a prepaid wallet.
//!
//! ## Core Types
//!
//! - [`Lot`], [`Floor`] and [`Spot`]: the inventory
//! - [`TimeWindow`] and [`Amount`]: half-open windows and money in cents
//! - [`Reservation`]: a committed booking
//! - [`Database`]: the `SQLite` store
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use parkade::{Amount, TimeWindow};
//!
//! let morning: TimeWindow = "09:00-10:00".parse().unwrap();
//! let next: TimeWindow = "10:00-11:00".parse().unwrap();
//! assert!(!morning.overlaps(&next));
//!
//! let price: Amount = "12.50".parse().unwrap();
//! assert_eq!(price.cents(), 1250);
//! ```

pub mod amount;
pub mod availability;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod window;

// Re-export key types at crate root for convenience
pub use amount::Amount;
pub use availability::{FloorAvailability, OccupiedSpot};
pub use catalog::CatalogFile;
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use database::{Database, DatabaseConfig, ImportSummary};
pub use error::{Error, ErrorKind, PaymentFailureReason, Result};
pub use inventory::{
    Account, AccountId, Car, CarId, Floor, FloorId, Lot, LotId, LotSummary, PriceTarget, Spot,
    SpotId,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{reserve, ReserveOutcome, ReservePolicy, ReserveRequest};
pub use reservation::{PaymentMode, Reservation, ReservationDetail, ReservationId};
pub use window::TimeWindow;
