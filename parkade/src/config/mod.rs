//! Configuration system for parkade.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from the following sources (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PARKADE_*`)
//! 3. User config (`<data_dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use parkade::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("lock wait: {:?}", config.maximum_lock_wait());
//! ```
//!
//! Loading from a specific data directory:
//!
//! ```no_run
//! use parkade::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir("/srv/parkade")
//!     .build()
//!     .unwrap();
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat};
pub use validator::ConfigValidator;
