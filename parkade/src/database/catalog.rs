//! Catalog import.

use rusqlite::{params, Transaction};
use serde::Serialize;

use crate::catalog::{AccountEntry, CatalogFile, LotEntry};
use crate::error::{Error, Result};
use crate::inventory::{AccountId, LotId};

use super::connection::Database;
use super::convert::time_to_sql;

const INSERT_LOT: &str = r"
    INSERT INTO lots (id, name, capacity, open_sec, close_sec, node1, node2, price)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
";

const INSERT_FLOOR: &str = "INSERT INTO floors (lot_id, number) VALUES (?1, ?2)";

const INSERT_SPOT: &str = "INSERT INTO spots (floor_id, number, price) VALUES (?1, ?2, ?3)";

const INSERT_ACCOUNT: &str =
    "INSERT INTO accounts (id, full_name, phone_number) VALUES (?1, ?2, ?3)";

const INSERT_WALLET: &str = "INSERT INTO wallets (account_id, balance) VALUES (?1, ?2)";

const INSERT_CAR: &str =
    "INSERT INTO cars (id, account_id, model, plate, color) VALUES (?1, ?2, ?3, ?4, ?5)";

/// Counts of rows created by an import, with the ids assigned to lots and
/// accounts in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Ids of the created lots.
    pub lot_ids: Vec<LotId>,
    /// Number of floors created.
    pub floors: usize,
    /// Number of spots created.
    pub spots: usize,
    /// Ids of the created accounts.
    pub account_ids: Vec<AccountId>,
    /// Number of cars created.
    pub cars: usize,
}

impl Database {
    /// Imports a catalog in a single transaction.
    ///
    /// Either every row is created or none is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the catalog is invalid, or a store
    /// error if a row conflicts with existing data (for example a duplicate
    /// phone number or id).
    pub fn import_catalog(&mut self, catalog: &CatalogFile) -> Result<ImportSummary> {
        catalog.validate()?;

        let summary = self.with_immediate(|tx| {
            let mut summary = ImportSummary::default();
            for lot in &catalog.lots {
                insert_lot(tx, lot, &mut summary)?;
            }
            for account in &catalog.accounts {
                insert_account(tx, account, &mut summary)?;
            }
            Ok(summary)
        })?;

        log::info!(
            "imported {} lots, {} floors, {} spots, {} accounts, {} cars",
            summary.lot_ids.len(),
            summary.floors,
            summary.spots,
            summary.account_ids.len(),
            summary.cars
        );
        Ok(summary)
    }
}

fn insert_lot(tx: &Transaction<'_>, lot: &LotEntry, summary: &mut ImportSummary) -> Result<()> {
    let capacity = match lot.capacity {
        Some(capacity) => capacity,
        None => u32::try_from(lot.spot_total()).map_err(|_| Error::Validation {
            field: "capacity".into(),
            message: format!("lot '{}' has too many spots", lot.name),
        })?,
    };

    tx.execute(
        INSERT_LOT,
        params![
            lot.id,
            lot.name.trim(),
            capacity,
            time_to_sql(lot.open_time),
            time_to_sql(lot.close_time),
            lot.node1,
            lot.node2,
            lot.price,
        ],
    )?;
    let lot_id = LotId::new(tx.last_insert_rowid());
    summary.lot_ids.push(lot_id);

    for floor in &lot.floors {
        tx.execute(INSERT_FLOOR, params![lot_id, floor.number])?;
        let floor_id = tx.last_insert_rowid();
        summary.floors += 1;

        let mut stmt = tx.prepare_cached(INSERT_SPOT)?;
        for (number, price) in floor.spot_numbers() {
            stmt.execute(params![floor_id, number, price])?;
            summary.spots += 1;
        }
    }

    Ok(())
}

fn insert_account(
    tx: &Transaction<'_>,
    account: &AccountEntry,
    summary: &mut ImportSummary,
) -> Result<()> {
    tx.execute(
        INSERT_ACCOUNT,
        params![
            account.id,
            account.full_name.trim(),
            account.phone_number.trim()
        ],
    )?;
    let account_id = AccountId::new(tx.last_insert_rowid());
    summary.account_ids.push(account_id);

    tx.execute(INSERT_WALLET, params![account_id, account.balance])?;

    for car in &account.cars {
        tx.execute(
            INSERT_CAR,
            params![car.id, account_id, car.model, car.plate.trim(), car.color],
        )?;
        summary.cars += 1;
    }

    Ok(())
}
