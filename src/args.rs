//! These structs provide the CLI interface for the mint2monarch CLI.

use crate::chunk::MAX_ROWS_DEFAULT;
use clap::Parser;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// mint2monarch: Convert a Mint transaction export into Monarch Money import files.
///
/// The Mint export is read, account names are optionally renamed, and the transactions are
/// written as one or more CSV files per account that Monarch can import.
///
/// Account names rarely line up between the two services. Run once with
/// --account-mapping-helper to get a file listing every account, edit its Monarch column, then
/// pass it back with --account-mapping-translate.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    /// The Mint transaction export (CSV).
    input_file: PathBuf,

    /// The directory that Monarch import files are written to. It is created if needed.
    #[arg(short, long, env = "MINT2MONARCH_OUTPUT_DIR", default_value_t = default_output_dir())]
    output_dir: DisplayPath,

    /// Write a stub account mapping file to this path and exit without converting anything.
    #[arg(long, value_name = "PATH", conflicts_with = "account_mapping_translate")]
    account_mapping_helper: Option<PathBuf>,

    /// Rename accounts using this mapping file. Every account in the export must be listed.
    #[arg(long, value_name = "PATH")]
    account_mapping_translate: Option<PathBuf>,

    /// The maximum number of rows in each output file.
    #[arg(
        short = 'r',
        long,
        env = "MINT2MONARCH_MAX_ROWS",
        default_value_t = default_max_rows()
    )]
    max_rows: NonZeroUsize,

    /// Show which files would be written without writing them.
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    pub fn output_dir(&self) -> &DisplayPath {
        &self.output_dir
    }

    pub fn account_mapping_helper(&self) -> Option<&Path> {
        self.account_mapping_helper.as_deref()
    }

    pub fn account_mapping_translate(&self) -> Option<&Path> {
        self.account_mapping_translate.as_deref()
    }

    pub fn max_rows(&self) -> NonZeroUsize {
        self.max_rows
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Logging options.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber EnvFilter for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// Shorthand for --log-level debug.
    #[arg(short, long)]
    verbose: bool,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            self.log_level.max(LevelFilter::DEBUG)
        } else {
            self.log_level
        }
    }
}

fn default_output_dir() -> DisplayPath {
    DisplayPath(PathBuf::from("monarch-import"))
}

fn default_max_rows() -> NonZeroUsize {
    NonZeroUsize::new(MAX_ROWS_DEFAULT).unwrap_or(NonZeroUsize::MIN)
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["mint2monarch", "mint.csv"]).unwrap();
        assert_eq!(args.input_file(), Path::new("mint.csv"));
        assert_eq!(args.output_dir().path(), Path::new("monarch-import"));
        assert_eq!(args.max_rows().get(), 5000);
        assert!(args.account_mapping_helper().is_none());
        assert!(args.account_mapping_translate().is_none());
        assert!(!args.dry_run());
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "mint2monarch",
            "mint.csv",
            "-o",
            "out",
            "--account-mapping-translate",
            "accounts.csv",
            "-r",
            "10",
            "--dry-run",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.output_dir().path(), Path::new("out"));
        assert_eq!(
            args.account_mapping_translate(),
            Some(Path::new("accounts.csv"))
        );
        assert_eq!(args.max_rows().get(), 10);
        assert!(args.dry_run());
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_zero_max_rows_rejected() {
        assert!(Args::try_parse_from(["mint2monarch", "mint.csv", "--max-rows", "0"]).is_err());
    }

    #[test]
    fn test_input_required() {
        assert!(Args::try_parse_from(["mint2monarch"]).is_err());
    }

    #[test]
    fn test_helper_conflicts_with_translate() {
        let result = Args::try_parse_from([
            "mint2monarch",
            "mint.csv",
            "--account-mapping-helper",
            "a.csv",
            "--account-mapping-translate",
            "b.csv",
        ]);
        assert!(result.is_err());
    }
}
