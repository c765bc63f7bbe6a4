//! Workflows built on the store: initialization, availability and
//! reservation.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use parkade::config::ConfigBuilder;
//! use parkade::operations::{reserve, ReservePolicy, ReserveRequest};
//! use parkade::{AccountId, CarId, Database, DatabaseConfig, FloorId, LotId, PaymentMode};
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let mut db = Database::open(
//!     DatabaseConfig::new("/tmp/parkade.db").with_busy_timeout(config.maximum_lock_wait()),
//! )
//! .unwrap();
//!
//! let request = ReserveRequest::new(
//!     AccountId::new(1),
//!     CarId::new(1),
//!     LotId::new(1),
//!     FloorId::new(1),
//!     3,
//!     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
//!     "09:00-10:00".parse().unwrap(),
//! )
//! .with_payment_mode(PaymentMode::Wallet);
//!
//! let reservation = reserve(&mut db, &request, &ReservePolicy::from_config(&config)).unwrap();
//! println!("reservation {}", reservation.id());
//! ```

pub mod availability;
pub mod init;
pub mod reserve;

pub use availability::{floor_availability, resolve_window, AvailabilityQuery};
pub use init::{init_data_dir, InitOptions, InitResult};
pub use reserve::{reserve, ReserveOutcome, ReservePolicy, ReserveRequest};

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
