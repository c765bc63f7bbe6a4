//! Availability command implementation.

use crate::error::CliError;
use crate::output::write_availability;
use crate::utils::{
    load_configuration, open_database, output_format, parse_date, parse_time_arg, GlobalOptions,
};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use parkade::operations::{floor_availability, AvailabilityQuery};
use parkade::{FloorId, LotId, OutputFormat};
use std::io;

/// Show free and occupied spots on a floor.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// Lot id
    #[arg(long, value_name = "LOT_ID")]
    pub lot: LotId,

    /// Floor id
    #[arg(long, value_name = "FLOOR_ID")]
    pub floor: FloorId,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Window start (HH:MM)
    #[arg(long, value_parser = parse_time_arg)]
    pub start: NaiveTime,

    /// Window end (HH:MM); defaults to start plus the configured window length
    #[arg(long, value_parser = parse_time_arg)]
    pub end: Option<NaiveTime>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let query =
            AvailabilityQuery::new(self.lot, self.floor, self.date, self.start).with_end(self.end);
        let availability = floor_availability(&db, &query, &config)?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_availability(
            &mut handle,
            output_format(self.format, &config),
            &availability,
        )
    }
}
