//! Lot browsing commands.

use crate::error::CliError;
use crate::output::write_records;
use crate::utils::{load_configuration, open_database, output_format, GlobalOptions};
use clap::Args;
use parkade::window::format_time;
use parkade::{Database, LotId, OutputFormat};
use std::io;

/// List lots.
#[derive(Args)]
pub struct LotsCommand {
    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl LotsCommand {
    /// Execute the lots command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let lots = Database::list_lots(db.connection())?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_records(&mut handle, output_format(self.format, &config), &lots)
    }
}

/// Show one lot with its floors and price.
#[derive(Args)]
pub struct LotCommand {
    /// Lot id
    #[arg(value_name = "LOT_ID")]
    pub lot: LotId,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl LotCommand {
    /// Execute the lot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let conn = db.connection();

        let lot = Database::get_lot(conn, self.lot)?;
        let floors = Database::list_floors(conn, self.lot)?;

        match output_format(self.format, &config) {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "lot": lot,
                    "floors": floors,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            OutputFormat::Table | OutputFormat::Csv => {
                println!("Lot {}: {}", lot.id, lot.name);
                println!(
                    "Hours: {}-{}",
                    format_time(lot.open_time),
                    format_time(lot.close_time)
                );
                println!("Price: {}", lot.price);
                println!("Capacity: {}", lot.capacity);
                println!("Location: {}, {}", lot.node1, lot.node2);
                for floor in &floors {
                    let spots = Database::get_floor_capacity(conn, floor.id)?;
                    println!("Floor {} (id {}): {spots} spots", floor.number, floor.id);
                }
            }
        }

        Ok(())
    }
}
