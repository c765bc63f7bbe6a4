//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the parkade data directory and database.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Parser;
use parkade::config::CONFIG_FILE_NAME;
use parkade::database::DATABASE_FILE_NAME;
use parkade::operations::{init_data_dir, InitOptions};
use std::path::PathBuf;

/// Initialize parkade data directory and database.
#[derive(Parser)]
#[command(about = "Initialize parkade data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create a sample configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// The --data-dir flag here names where to create, not where to find.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => resolve_data_dir(global)?,
        };

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize parkade in: {}", data_dir.display());

            if data_dir.exists() {
                println!("  - Data directory already exists: {}", data_dir.display());
            } else {
                println!("  - Create data directory: {}", data_dir.display());
            }

            let db_path = data_dir.join(DATABASE_FILE_NAME);
            if !db_path.exists() {
                println!("  - Create database: {}", db_path.display());
            } else if self.overwrite {
                println!("  - Replace existing database: {}", db_path.display());
            } else {
                println!(
                    "  - ERROR: Database already exists (use --overwrite to replace): {}",
                    db_path.display()
                );
            }

            if self.with_config {
                let config_path = data_dir.join(CONFIG_FILE_NAME);
                if config_path.exists() {
                    println!(
                        "  - Configuration file already exists (will not overwrite): {}",
                        config_path.display()
                    );
                } else {
                    println!("  - Create configuration file: {}", config_path.display());
                }
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);

        let result = init_data_dir(&options).map_err(CliError::from)?;

        if global.quiet {
            return Ok(());
        }

        println!("Initialized parkade in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }
        if result.config_created {
            println!("  - Created sample configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
