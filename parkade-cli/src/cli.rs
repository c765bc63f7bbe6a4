//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailabilityCommand, BalanceCommand, CompletionsCommand, HistoryCommand, ImportCommand,
    InitCommand, LotCommand, LotsCommand, ReserveCommand, TopUpCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for parking spot reservations.
#[derive(Parser)]
#[command(name = "parkade")]
#[command(version, about = "Reserve parking spots and manage wallets", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PARKADE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the maximum lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "PARKADE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Import lots, floors, spots, accounts and cars from a catalog file
    Import(ImportCommand),

    /// List lots
    Lots(LotsCommand),

    /// Show one lot with its floors and price
    Lot(LotCommand),

    /// Show free and occupied spots on a floor
    Availability(AvailabilityCommand),

    /// Reserve a spot
    Reserve(ReserveCommand),

    /// Show a wallet balance
    Balance(BalanceCommand),

    /// Credit a wallet
    TopUp(TopUpCommand),

    /// List an account's reservations
    History(HistoryCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
