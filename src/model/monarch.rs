//! The row format that Monarch Money accepts for CSV transaction imports, and the conversion from
//! a Mint record into it.

use crate::model::mint::{MintColumns, TransactionType};
use crate::model::{Amount, Record};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

const MINT_DATE_FORMAT: &str = "%m/%d/%Y";
const MONARCH_DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of a Monarch import file. Field order here is the column order of the file.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonarchRow {
    pub(crate) date: String,
    pub(crate) merchant: String,
    pub(crate) category: String,
    pub(crate) account: String,
    #[serde(rename = "Original Statement")]
    pub(crate) original_statement: String,
    pub(crate) notes: String,
    pub(crate) amount: String,
    pub(crate) tags: String,
}

impl MonarchRow {
    /// Converts a Mint record. `path` is the Mint file, used for error messages.
    ///
    /// - `Date` goes from `MM/DD/YYYY` to `YYYY-MM-DD`. An unreadable date becomes empty.
    /// - `Amount` is negated when the transaction type is `debit`.
    /// - Other fields are renamed and copied verbatim.
    pub(crate) fn from_mint(path: &Path, cols: &MintColumns, record: &Record) -> Result<Self> {
        let raw_amount = record.get(cols.amount);
        let amount = Amount::from_str(raw_amount).map_err(|e| {
            Error::format(
                path,
                Some(record.line()),
                format!("unable to parse amount '{raw_amount}': {e}"),
            )
        })?;
        let amount = match TransactionType::parse(record.get(cols.transaction_type)) {
            Some(TransactionType::Debit) => -amount,
            _ => amount,
        };

        let raw_date = record.get(cols.date);
        let date = match convert_date(raw_date) {
            Some(date) => date,
            None => {
                warn!(
                    "Unable to parse date '{raw_date}' on line {}, leaving it empty",
                    record.line()
                );
                String::new()
            }
        };

        Ok(Self {
            date,
            merchant: record.get(cols.description).to_string(),
            category: record.get(cols.category).to_string(),
            account: record.get(cols.account_name).to_string(),
            original_statement: record.get(cols.original_description).to_string(),
            notes: record.get(cols.notes).to_string(),
            amount: amount.to_string(),
            tags: record.get(cols.labels).to_string(),
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }
}

/// Converts a Mint date into a Monarch date. Dates already in Monarch's format are accepted.
fn convert_date(s: &str) -> Option<String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, MINT_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, MONARCH_DATE_FORMAT))
        .ok()
        .map(|d| d.format(MONARCH_DATE_FORMAT).to_string())
}
