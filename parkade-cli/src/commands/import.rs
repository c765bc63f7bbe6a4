//! Import command implementation.
//!
//! Loads a catalog of lots, floors, spots, accounts and cars in one
//! transaction and prints the ids that were assigned.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, output_format, GlobalOptions};
use clap::Args;
use parkade::{CatalogFile, OutputFormat};
use std::path::PathBuf;

/// Import a catalog file.
#[derive(Args)]
pub struct ImportCommand {
    /// Catalog file (YAML)
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl ImportCommand {
    /// Execute the import command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.catalog.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.catalog.display()
            )));
        }

        let config = load_configuration(global)?;
        let catalog = CatalogFile::load(&self.catalog)?;
        let mut db = open_database(global, &config)?;
        let summary = db.import_catalog(&catalog)?;

        match output_format(self.format, &config) {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Table | OutputFormat::Csv => {
                if !global.quiet {
                    println!(
                        "Imported {} lots, {} floors, {} spots, {} accounts, {} cars",
                        summary.lot_ids.len(),
                        summary.floors,
                        summary.spots,
                        summary.account_ids.len(),
                        summary.cars
                    );
                }
                for id in &summary.lot_ids {
                    println!("lot\t{id}");
                }
                for id in &summary.account_ids {
                    println!("account\t{id}");
                }
            }
        }

        Ok(())
    }
}
