//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use std::fmt::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MINT_HEADER: &str = r#""Date","Description","Original Description","Amount","Transaction Type","Category","Account Name","Labels","Notes""#;

/// Builds a Mint export with one row per entry in `accounts`. Row `i` has the merchant
/// `Merchant {i}`, an amount of `10.00`, and is a debit when `i` is even.
pub fn mint_csv(accounts: &[&str]) -> String {
    let mut csv = format!("{MINT_HEADER}\n");
    for (i, account) in accounts.iter().enumerate() {
        let day = i % 28 + 1;
        let kind = if i % 2 == 0 { "debit" } else { "credit" };
        let _ = writeln!(
            csv,
            r#""01/{day:02}/2023","Merchant {i}","MERCHANT {i} POS","10.00","{kind}","Groceries","{account}","tag","note {i}""#
        );
    }
    csv
}

/// A temporary directory that input files can be written to and output files read from.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Returns the path of `name` within the environment without creating anything.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Writes `contents` to `name` and returns its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Lists the file names in `dir`, sorted.
    pub fn list(&self, dir: impl AsRef<Path>) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Reads the data rows of a CSV file, skipping the header.
    pub fn read_rows(&self, path: impl AsRef<Path>) -> Vec<Vec<String>> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }
}
