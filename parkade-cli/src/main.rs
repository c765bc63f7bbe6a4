//! Main entry point for the parkade CLI.
//!
//! This is the command-line interface for the parkade reservation engine.
//! It provides commands for:
//! - `init` / `import`: Set up a data directory and load a catalog
//! - `lots` / `lot` / `availability`: Browse lots and free spots
//! - `reserve`: Reserve a spot
//! - `balance` / `top-up` / `history`: Account wallet and reservations

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _level = parkade::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Import(cmd) => cmd.execute(&global),
        cli::Command::Lots(cmd) => cmd.execute(&global),
        cli::Command::Lot(cmd) => cmd.execute(&global),
        cli::Command::Availability(cmd) => cmd.execute(&global),
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::Balance(cmd) => cmd.execute(&global),
        cli::Command::TopUp(cmd) => cmd.execute(&global),
        cli::Command::History(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
