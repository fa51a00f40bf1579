//! Converts Mint transaction exports into CSV files that Monarch Money can import.
//!
//! The conversion is a single pass: load the export, optionally rename accounts through a
//! mapping file, convert each row to the Monarch columns, then write each account's rows to one
//! or more files of bounded size.

pub mod accounts;
pub mod args;
pub mod chunk;
pub mod commands;
mod error;
mod fs;
pub mod model;

#[cfg(test)]
mod test;

pub use error::Error;
pub use error::Result;
