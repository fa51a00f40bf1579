//! The columns of a Mint transaction export.
//!
//! "Date","Description","Original Description","Amount","Transaction Type","Category","Account Name","Labels","Notes"

use crate::model::Records;
use crate::Result;
use serde::{Deserialize, Serialize};

pub(crate) const DATE_STR: &str = "Date";
pub(crate) const DESCRIPTION_STR: &str = "Description";
pub(crate) const ORIGINAL_DESCRIPTION_STR: &str = "Original Description";
pub(crate) const AMOUNT_STR: &str = "Amount";
pub(crate) const TRANSACTION_TYPE_STR: &str = "Transaction Type";
pub(crate) const CATEGORY_STR: &str = "Category";
pub(crate) const ACCOUNT_NAME_STR: &str = "Account Name";
pub(crate) const LABELS_STR: &str = "Labels";
pub(crate) const NOTES_STR: &str = "Notes";

/// Mint reports every amount as a positive number and puts the direction in this column.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Credit,
    Debit,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

impl TransactionType {
    /// Case-insensitive. Returns `None` for anything other than `debit` or `credit`.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().to_lowercase().parse().ok()
    }
}

/// The column positions of a Mint export, resolved from the header of a specific file.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct MintColumns {
    pub(crate) date: usize,
    pub(crate) description: usize,
    pub(crate) original_description: usize,
    pub(crate) amount: usize,
    pub(crate) transaction_type: usize,
    pub(crate) category: usize,
    pub(crate) account_name: usize,
    pub(crate) labels: usize,
    pub(crate) notes: usize,
}

impl MintColumns {
    /// Resolves every Mint column in `records`. Any missing column is a `Format` error.
    pub(crate) fn resolve(records: &Records) -> Result<Self> {
        Ok(Self {
            date: records.column(DATE_STR)?,
            description: records.column(DESCRIPTION_STR)?,
            original_description: records.column(ORIGINAL_DESCRIPTION_STR)?,
            amount: records.column(AMOUNT_STR)?,
            transaction_type: records.column(TRANSACTION_TYPE_STR)?,
            category: records.column(CATEGORY_STR)?,
            account_name: records.column(ACCOUNT_NAME_STR)?,
            labels: records.column(LABELS_STR)?,
            notes: records.column(NOTES_STR)?,
        })
    }
}
