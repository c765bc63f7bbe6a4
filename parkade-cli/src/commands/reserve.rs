//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which reserves one spot for
//! one window and prints the reservation id.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_amount, parse_date, parse_time_arg, GlobalOptions,
};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use parkade::operations::{reserve, resolve_window, ReservePolicy, ReserveRequest};
use parkade::{AccountId, Amount, CarId, FloorId, LotId, PaymentMode};
use std::time::Duration;

/// Reserve a spot.
#[derive(Args)]
pub struct ReserveCommand {
    /// Reserving account
    #[arg(long, value_name = "ACCOUNT_ID", env = "PARKADE_ACCOUNT")]
    pub account: AccountId,

    /// Car to park; must belong to the account
    #[arg(long, value_name = "CAR_ID")]
    pub car: CarId,

    /// Lot id
    #[arg(long, value_name = "LOT_ID")]
    pub lot: LotId,

    /// Floor id
    #[arg(long, value_name = "FLOOR_ID")]
    pub floor: FloorId,

    /// Spot number on the floor
    #[arg(long, value_name = "NUMBER")]
    pub spot: u32,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Window start (HH:MM)
    #[arg(long, value_parser = parse_time_arg)]
    pub start: NaiveTime,

    /// Window end (HH:MM); defaults to start plus the configured window length
    #[arg(long, value_parser = parse_time_arg)]
    pub end: Option<NaiveTime>,

    /// Payment mode (wallet or online)
    #[arg(long, value_name = "MODE", default_value = "online")]
    pub pay: PaymentMode,

    /// Price to charge instead of the spot's price
    #[arg(long, value_parser = parse_amount)]
    pub price: Option<Amount>,

    /// Give up if the reservation cannot commit within this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let window = resolve_window(self.start, self.end, config.default_window_minutes())
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let mut request = ReserveRequest::new(
            self.account,
            self.car,
            self.lot,
            self.floor,
            self.spot,
            self.date,
            window,
        )
        .with_payment_mode(self.pay)
        .with_price(self.price);
        if let Some(seconds) = self.timeout {
            request = request.with_timeout(Duration::from_secs(seconds));
        }

        let mut db = open_database(global, &config)?;
        let reservation = reserve(&mut db, &request, &ReservePolicy::from_config(&config))?;

        println!("{}", reservation.id());
        if global.verbose {
            eprintln!(
                "Reserved spot {} on {} {} for {} ({})",
                self.spot,
                reservation.date(),
                reservation.window(),
                reservation.price(),
                reservation.payment_mode()
            );
        }
        Ok(())
    }
}
