//! Record output in table, JSON and CSV form.
//!
//! Tables are tab-separated with uppercase headers. CSV uses the same
//! columns with lowercase headers. JSON is the serde form of the records.

use crate::error::CliError;
use parkade::{
    FloorAvailability, LotSummary, OccupiedSpot, OutputFormat, ReservationDetail,
};
use serde::Serialize;
use std::io::Write;

/// A record printed as one row.
pub trait Tabular: Serialize {
    /// Column names, lowercase.
    const COLUMNS: &'static [&'static str];

    /// Field values in column order.
    fn row(&self) -> Vec<String>;
}

impl Tabular for LotSummary {
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl Tabular for OccupiedSpot {
    const COLUMNS: &'static [&'static str] = &["spot", "reservation", "window", "price"];

    fn row(&self) -> Vec<String> {
        vec![
            self.spot_number.to_string(),
            self.reservation_id.to_string(),
            self.window.to_string(),
            self.price.to_string(),
        ]
    }
}

impl Tabular for ReservationDetail {
    const COLUMNS: &'static [&'static str] = &[
        "id", "lot", "floor", "spot", "date", "window", "plate", "price", "payment",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.lot_name.clone(),
            self.floor_number.to_string(),
            self.spot_number.to_string(),
            self.date.to_string(),
            self.window.to_string(),
            self.plate.clone(),
            self.price.to_string(),
            self.payment_mode.to_string(),
        ]
    }
}

/// Write `records` in the given format.
pub fn write_records<T: Tabular>(
    out: &mut impl Write,
    format: OutputFormat,
    records: &[T],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            let header = T::COLUMNS
                .iter()
                .map(|c| c.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(out, "{header}")?;
            for record in records {
                writeln!(out, "{}", record.row().join("\t"))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(T::COLUMNS)?;
            for record in records {
                writer.write_record(record.row())?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

/// Write a floor summary. Tables and CSV list the occupied spots after the
/// counts; JSON is the whole summary.
pub fn write_availability(
    out: &mut impl Write,
    format: OutputFormat,
    availability: &FloorAvailability,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, availability)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "Lot {} floor {} on {} {}",
                availability.lot_id, availability.floor_id, availability.date, availability.window
            )?;
            writeln!(out, "Capacity: {}", availability.capacity)?;
            writeln!(out, "Free: {}", availability.free)?;
            if availability.occupied.is_empty() {
                return Ok(());
            }
            writeln!(out)?;
            write_records(out, format, &availability.occupied)
        }
        OutputFormat::Csv => write_records(out, format, &availability.occupied),
    }
}
