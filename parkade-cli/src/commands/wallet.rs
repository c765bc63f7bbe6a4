//! Wallet commands.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_amount, GlobalOptions};
use clap::Args;
use parkade::{AccountId, Amount, Database};

/// Show a wallet balance.
#[derive(Args)]
pub struct BalanceCommand {
    /// Account id
    #[arg(long, value_name = "ACCOUNT_ID", env = "PARKADE_ACCOUNT")]
    pub account: AccountId,
}

impl BalanceCommand {
    /// Execute the balance command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let balance = Database::get_balance(db.connection(), self.account)?;
        println!("{balance}");
        Ok(())
    }
}

/// Credit a wallet.
#[derive(Args)]
pub struct TopUpCommand {
    /// Account id
    #[arg(long, value_name = "ACCOUNT_ID", env = "PARKADE_ACCOUNT")]
    pub account: AccountId,

    /// Amount to add, such as 20 or 12.50
    #[arg(long, value_parser = parse_amount)]
    pub amount: Amount,
}

impl TopUpCommand {
    /// Execute the top-up command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.amount.is_zero() {
            return Err(CliError::InvalidArguments(
                "amount must be greater than zero".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let balance = db.credit(self.account, self.amount)?;
        println!("{balance}");
        Ok(())
    }
}
