//! Build script for parkade-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("parkade")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reserve parking spots and manage wallets")
        .long_about(
            "Command-line front end for the parkade reservation engine: lots, floors, \
             spot availability, reservations and wallet balances",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("PARKADE_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the maximum lock wait (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("PARKADE_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the data directory, the database and optionally a sample config.yaml"),
            Command::new("import")
                .about("Import a catalog file")
                .long_about("Import lots, floors, spots, accounts and cars from a YAML catalog"),
            Command::new("lots").about("List lots"),
            Command::new("lot")
                .about("Show one lot")
                .long_about("Show a lot with its opening hours, price and floors"),
            Command::new("availability")
                .about("Show free and occupied spots on a floor")
                .long_about("Show capacity, free count and occupied spots for a date and window"),
            Command::new("reserve")
                .about("Reserve a spot")
                .long_about("Reserve one spot for one window, paying from the wallet or online"),
            Command::new("balance").about("Show a wallet balance"),
            Command::new("top-up").about("Credit a wallet"),
            Command::new("history")
                .about("List an account's reservations")
                .long_about("List an account's reservations, newest first"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a parkade configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("parkade.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
