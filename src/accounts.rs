//! Renaming of account names between Mint and Monarch.
//!
//! A mapping file is a two-column CSV, `Source,Monarch`. The helper mode writes one with both
//! columns equal so the user can edit the `Monarch` column. The translate mode reads it back and
//! rewrites the `Account Name` of every record.

use crate::model::mint::ACCOUNT_NAME_STR;
use crate::model::Records;
use crate::{fs, Error, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub(crate) const SOURCE_STR: &str = "Source";
/// Older helper files used the name of the source service for the key column.
pub(crate) const LEGACY_SOURCE_STR: &str = "Mint";
pub(crate) const MONARCH_STR: &str = "Monarch";

/// One row of an account mapping file.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountPair {
    source: String,
    monarch: String,
}

impl AccountPair {
    pub fn new(source: impl Into<String>, monarch: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            monarch: monarch.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn monarch(&self) -> &str {
        &self.monarch
    }
}

/// Lookup from Mint account name to Monarch account name, loaded from a mapping file.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AccountMap {
    path: PathBuf,
    map: HashMap<String, String>,
}

impl AccountMap {
    /// Loads a mapping file from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let records = Records::load(path)?;
        Self::from_records(&records)
    }

    /// Builds the map from an already loaded mapping file.
    ///
    /// # Errors
    /// - `Error::Format` if either column is missing, a source name appears twice, or a Monarch
    ///   name is empty.
    pub fn from_records(records: &Records) -> Result<Self> {
        let path = records.path();
        let source_ix = match records.mapping().index(SOURCE_STR) {
            Some(ix) => ix,
            None => records
                .column(LEGACY_SOURCE_STR)
                .map_err(|_| {
                    Error::format(
                        path,
                        Some(1),
                        format!("Required column '{SOURCE_STR}' is missing"),
                    )
                })?,
        };
        let monarch_ix = records.column(MONARCH_STR)?;

        let mut map = HashMap::with_capacity(records.len());
        for record in records.iter() {
            let source = record.get(source_ix);
            let monarch = record.get(monarch_ix);
            if monarch.is_empty() {
                return Err(Error::format(
                    path,
                    Some(record.line()),
                    format!("account '{source}' maps to an empty name"),
                ));
            }
            if map.insert(source.to_string(), monarch.to_string()).is_some() {
                return Err(Error::format(
                    path,
                    Some(record.line()),
                    format!("account '{source}' is listed more than once"),
                ));
            }
            debug!("Mapping '{source}' to '{monarch}'");
        }

        Ok(Self {
            path: path.to_path_buf(),
            map,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.map.get(source).map(String::as_str)
    }

    /// Rewrites the `Account Name` of every record in place.
    ///
    /// # Errors
    /// - `Error::Format` if `records` has no `Account Name` column.
    /// - `Error::UnmappedAccount` for the first record whose account is not in the map. Records
    ///   must not be used after this error since some of them may already be rewritten.
    pub fn translate(&self, records: &mut Records) -> Result<()> {
        let account_ix = records.column(ACCOUNT_NAME_STR)?;
        for record in records.iter_mut() {
            let source = record.get(account_ix);
            let monarch = self.get(source).ok_or_else(|| Error::UnmappedAccount {
                account: source.to_string(),
                line: record.line(),
                mapping: self.path.clone(),
            })?;
            let monarch = monarch.to_string();
            record.set(account_ix, monarch);
        }
        Ok(())
    }
}

/// Checks that no record has an empty `Account Name`.
pub fn validate_accounts(records: &Records) -> Result<()> {
    let account_ix = records.column(ACCOUNT_NAME_STR)?;
    match records.iter().find(|r| r.get(account_ix).is_empty()) {
        Some(record) => Err(Error::format(
            records.path(),
            Some(record.line()),
            format!("'{ACCOUNT_NAME_STR}' is empty"),
        )),
        None => Ok(()),
    }
}

/// Lists each distinct account name in `records` once, in the order first seen, mapped to itself.
pub fn helper_pairs(records: &Records) -> Result<Vec<AccountPair>> {
    let account_ix = records.column(ACCOUNT_NAME_STR)?;
    let mut seen = HashSet::new();
    Ok(records
        .iter()
        .map(|r| r.get(account_ix))
        .filter(|name| seen.insert(*name))
        .map(|name| AccountPair::new(name, name))
        .collect())
}

/// Writes `pairs` as a mapping file. An existing file at `path` is overwritten.
pub fn write_helper(path: impl AsRef<Path>, pairs: &[AccountPair]) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        warn!("Overwriting the existing account mapping file {}", path.display());
    }
    let mut w = fs::csv_writer(path)?;
    // serialize() only writes the header when there is at least one row
    w.write_record([SOURCE_STR, MONARCH_STR])
        .map_err(|e| fs::write_err(path, e))?;
    for pair in pairs {
        w.write_record([pair.source(), pair.monarch()])
            .map_err(|e| fs::write_err(path, e))?;
    }
    fs::finish(path, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{mint_csv, TestEnv, MINT_HEADER};

    fn mint(accounts: &[&str]) -> Records {
        let csv = mint_csv(accounts);
        Records::from_reader("mint.csv", csv.as_bytes()).unwrap()
    }

    fn names(records: &Records) -> Vec<String> {
        let ix = records.column(ACCOUNT_NAME_STR).unwrap();
        records.iter().map(|r| r.get(ix).to_string()).collect()
    }

    #[test]
    fn test_helper_first_seen_order() {
        let records = mint(&["Chase", "Amex", "Chase"]);
        let pairs = helper_pairs(&records).unwrap();
        assert_eq!(
            pairs,
            vec![
                AccountPair::new("Chase", "Chase"),
                AccountPair::new("Amex", "Amex")
            ]
        );
    }

    #[test]
    fn test_helper_round_trip() {
        let env = TestEnv::new();
        let original = mint(&["Chase", "Amex", "Chase", "Discover"]);
        let helper = env.path("accounts.csv");
        write_helper(&helper, &helper_pairs(&original).unwrap()).unwrap();

        let map = AccountMap::load(&helper).unwrap();
        assert_eq!(map.len(), 3);
        let mut translated = original.clone();
        map.translate(&mut translated).unwrap();
        assert_eq!(names(&translated), names(&original));
    }

    #[test]
    fn test_helper_overwrites() {
        let env = TestEnv::new();
        let helper = env.write("accounts.csv", "stale contents");
        write_helper(&helper, &[AccountPair::new("Chase", "Chase")]).unwrap();
        let contents = std::fs::read_to_string(&helper).unwrap();
        assert_eq!(contents, "Source,Monarch\nChase,Chase\n");
    }

    #[test]
    fn test_helper_header_only_export() {
        let env = TestEnv::new();
        let records = Records::from_reader("mint.csv", format!("{MINT_HEADER}\n").as_bytes())
            .unwrap();
        let pairs = helper_pairs(&records).unwrap();
        assert!(pairs.is_empty());

        let helper = env.path("accounts.csv");
        write_helper(&helper, &pairs).unwrap();
        let contents = std::fs::read_to_string(&helper).unwrap();
        assert_eq!(contents, "Source,Monarch\n");
        assert_eq!(AccountMap::load(&helper).unwrap().len(), 0);
    }

    #[test]
    fn test_translate_renames() {
        let mut records = mint(&["Chase", "Amex", "Chase"]);
        let mapping = "Source,Monarch\nChase,Chase Sapphire\nAmex,Amex Gold\n";
        let map = AccountMap::from_records(
            &Records::from_reader("map.csv", mapping.as_bytes()).unwrap(),
        )
        .unwrap();
        map.translate(&mut records).unwrap();
        assert_eq!(
            names(&records),
            vec!["Chase Sapphire", "Amex Gold", "Chase Sapphire"]
        );
    }

    #[test]
    fn test_translate_legacy_header() {
        let mut records = mint(&["Chase"]);
        let mapping = "Mint,Monarch\nChase,Chase Sapphire\n";
        let map = AccountMap::from_records(
            &Records::from_reader("map.csv", mapping.as_bytes()).unwrap(),
        )
        .unwrap();
        map.translate(&mut records).unwrap();
        assert_eq!(names(&records), vec!["Chase Sapphire"]);
    }

    #[test]
    fn test_translate_unmapped() {
        let mut records = mint(&["Chase", "Amex"]);
        let mapping = "Source,Monarch\nChase,Chase Sapphire\n";
        let map = AccountMap::from_records(
            &Records::from_reader("map.csv", mapping.as_bytes()).unwrap(),
        )
        .unwrap();
        let err = map.translate(&mut records).unwrap_err();
        match err {
            Error::UnmappedAccount {
                account,
                line,
                mapping,
            } => {
                assert_eq!(account, "Amex");
                assert_eq!(line, 3);
                assert_eq!(mapping, PathBuf::from("map.csv"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_mapping_duplicate_source() {
        let mapping = "Source,Monarch\nChase,A\nChase,B\n";
        let records = Records::from_reader("map.csv", mapping.as_bytes()).unwrap();
        let err = AccountMap::from_records(&records).unwrap_err();
        assert!(matches!(err, Error::Format { line: Some(3), .. }), "{err}");
    }

    #[test]
    fn test_mapping_empty_target() {
        let mapping = "Source,Monarch\nChase,\n";
        let records = Records::from_reader("map.csv", mapping.as_bytes()).unwrap();
        let err = AccountMap::from_records(&records).unwrap_err();
        assert!(matches!(err, Error::Format { line: Some(2), .. }), "{err}");
    }

    #[test]
    fn test_mapping_missing_column() {
        let mapping = "From,To\nChase,Chase\n";
        let records = Records::from_reader("map.csv", mapping.as_bytes()).unwrap();
        let err = AccountMap::from_records(&records).unwrap_err();
        assert!(err.to_string().contains("'Source'"), "{err}");
    }

    #[test]
    fn test_validate_empty_account() {
        let records = mint(&["Chase", ""]);
        let err = validate_accounts(&records).unwrap_err();
        assert!(matches!(err, Error::Format { line: Some(3), .. }), "{err}");
        validate_accounts(&mint(&["Chase"])).unwrap();
    }
}
