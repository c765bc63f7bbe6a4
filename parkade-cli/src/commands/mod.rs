//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `import`: Import a catalog file
//! - `lots`, `lot`: Browse lots
//! - `availability`: Free and occupied spots on a floor
//! - `reserve`: Reserve a spot
//! - `balance`, `top_up`: Wallet
//! - `history`: An account's reservations
//! - `validate`: Validate a configuration file
//! - `completions`: Shell completion scripts

pub mod availability;
pub mod completions;
pub mod history;
pub mod import;
pub mod init;
pub mod lots;
pub mod reserve;
pub mod validate;
pub mod wallet;

pub use availability::AvailabilityCommand;
pub use completions::CompletionsCommand;
pub use history::HistoryCommand;
pub use import::ImportCommand;
pub use init::InitCommand;
pub use lots::{LotCommand, LotsCommand};
pub use reserve::ReserveCommand;
pub use validate::ValidateCommand;
pub use wallet::{BalanceCommand, TopUpCommand};
