//! Catalog files: the YAML description of lots, floors, spots, accounts and
//! cars that [`crate::Database::import_catalog`] loads into the store.
//!
//! # Examples
//!
//! ```
//! use parkade::catalog::CatalogFile;
//!
//! let catalog = CatalogFile::from_yaml_str(r#"
//! lots:
//!   - name: Central
//!     open_time: "07:00"
//!     close_time: "22:00"
//!     price: 15
//!     floors:
//!       - number: 1
//!         spot_count: 10
//! accounts:
//!   - full_name: Sam Driver
//!     phone_number: "+15550100"
//!     balance: "50.00"
//!     cars:
//!       - model: Corolla
//!         plate: 12A345
//!         color: white
//! "#).unwrap();
//!
//! assert_eq!(catalog.lots[0].floors[0].spot_numbers().len(), 10);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::amount::Amount;
use crate::error::{Error, Result};
use crate::inventory::{AccountId, CarId, LotId};

/// Top-level catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Lots to create.
    #[serde(default)]
    pub lots: Vec<LotEntry>,
    /// Accounts to create.
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
}

/// A lot with its floors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LotEntry {
    /// Explicit store id; assigned by the store when omitted.
    #[serde(default)]
    pub id: Option<LotId>,
    /// Display name.
    pub name: String,
    /// Declared capacity; defaults to the number of spots on all floors.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Opening time, `HH:MM`.
    #[serde(deserialize_with = "deserialize_time", serialize_with = "serialize_time")]
    pub open_time: NaiveTime,
    /// Closing time, `HH:MM`.
    #[serde(deserialize_with = "deserialize_time", serialize_with = "serialize_time")]
    pub close_time: NaiveTime,
    /// First geocoordinate.
    #[serde(default)]
    pub node1: String,
    /// Second geocoordinate.
    #[serde(default)]
    pub node2: String,
    /// Default spot price.
    pub price: Amount,
    /// Floors of the lot.
    #[serde(default)]
    pub floors: Vec<FloorEntry>,
}

impl LotEntry {
    /// Total number of spots across all floors.
    #[must_use]
    pub fn spot_total(&self) -> usize {
        self.floors.iter().map(|f| f.spot_numbers().len()).sum()
    }
}

/// A floor with its spots.
///
/// `spot_count: n` creates spots `1..=n` at the lot price. Entries in `spots`
/// add further numbers or give an existing number its own price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloorEntry {
    /// Floor number, unique within the lot.
    pub number: u32,
    /// Number of plainly priced spots, numbered from 1.
    #[serde(default)]
    pub spot_count: Option<u32>,
    /// Individually listed spots.
    #[serde(default)]
    pub spots: Vec<SpotEntry>,
}

impl FloorEntry {
    /// Returns every spot number with its own price, if any.
    #[must_use]
    pub fn spot_numbers(&self) -> BTreeMap<u32, Option<Amount>> {
        let mut numbers: BTreeMap<u32, Option<Amount>> =
            (1..=self.spot_count.unwrap_or(0)).map(|n| (n, None)).collect();
        for spot in &self.spots {
            numbers.insert(spot.number, spot.price);
        }
        numbers
    }
}

/// An individually listed spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpotEntry {
    /// Spot number, unique within the floor.
    pub number: u32,
    /// Spot-specific price.
    #[serde(default)]
    pub price: Option<Amount>,
}

/// An account with its wallet and cars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountEntry {
    /// Explicit store id; assigned by the store when omitted.
    #[serde(default)]
    pub id: Option<AccountId>,
    /// Full name.
    pub full_name: String,
    /// Phone number, unique across accounts.
    pub phone_number: String,
    /// Opening wallet balance.
    #[serde(default)]
    pub balance: Amount,
    /// Cars registered to the account.
    #[serde(default)]
    pub cars: Vec<CarEntry>,
}

/// A car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarEntry {
    /// Explicit store id; assigned by the store when omitted.
    #[serde(default)]
    pub id: Option<CarId>,
    /// Car model.
    pub model: String,
    /// License plate.
    pub plate: String,
    /// Color.
    #[serde(default)]
    pub color: String,
}

impl CatalogFile {
    /// Parses a catalog from YAML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for malformed YAML and
    /// [`Error::Validation`] for semantically invalid entries.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`CatalogFile::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Checks the entries that the store schema cannot check by itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending entry.
    pub fn validate(&self) -> Result<()> {
        for (i, lot) in self.lots.iter().enumerate() {
            if lot.name.trim().is_empty() {
                return Err(invalid(format!("lots[{i}].name"), "must not be empty"));
            }
            let mut seen = std::collections::HashSet::new();
            for floor in &lot.floors {
                if !seen.insert(floor.number) {
                    return Err(invalid(
                        format!("lots[{i}].floors"),
                        format!("floor number {} appears twice", floor.number),
                    ));
                }
                if floor.spots.iter().any(|s| s.number == 0) {
                    return Err(invalid(
                        format!("lots[{i}].floors[{}].spots", floor.number),
                        "spot numbers start at 1",
                    ));
                }
            }
        }

        for (i, account) in self.accounts.iter().enumerate() {
            if account.full_name.trim().is_empty() {
                return Err(invalid(format!("accounts[{i}].full_name"), "must not be empty"));
            }
            if account.phone_number.trim().is_empty() {
                return Err(invalid(
                    format!("accounts[{i}].phone_number"),
                    "must not be empty",
                ));
            }
            for (j, car) in account.cars.iter().enumerate() {
                if car.plate.trim().is_empty() {
                    return Err(invalid(
                        format!("accounts[{i}].cars[{j}].plate"),
                        "must not be empty",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn invalid(field: String, message: impl Into<String>) -> Error {
    Error::Validation {
        field,
        message: message.into(),
    }
}

fn deserialize_time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<NaiveTime, D::Error> {
    let text = String::deserialize(deserializer)?;
    crate::window::parse_time(&text).map_err(serde::de::Error::custom)
}

fn serialize_time<S: serde::Serializer>(
    time: &NaiveTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&crate::window::format_time(*time))
}
