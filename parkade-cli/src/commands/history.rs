//! History command implementation.

use crate::error::CliError;
use crate::output::write_records;
use crate::utils::{load_configuration, open_database, output_format, GlobalOptions};
use clap::Args;
use parkade::{AccountId, Database, OutputFormat};
use std::io;

/// List an account's reservations, newest first.
#[derive(Args)]
pub struct HistoryCommand {
    /// Account id
    #[arg(long, value_name = "ACCOUNT_ID", env = "PARKADE_ACCOUNT")]
    pub account: AccountId,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl HistoryCommand {
    /// Execute the history command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        // An unknown account is an error, not an empty history.
        Database::get_account(db.connection(), self.account)?;
        let history = Database::history(db.connection(), self.account)?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_records(&mut handle, output_format(self.format, &config), &history)
    }
}
