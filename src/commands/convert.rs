use crate::accounts::{validate_accounts, AccountMap};
use crate::chunk::{self, ChunkSummary};
use crate::commands::Out;
use crate::model::mint::MintColumns;
use crate::model::{MonarchRow, Records};
use crate::Result;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a `convert` run did.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertSummary {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub rows: usize,
    pub files: Vec<ChunkSummary>,
}

/// Converts the Mint export at `input` into Monarch import files in `output_dir`.
///
/// # Arguments
/// - `input` - The Mint CSV export.
/// - `output_dir` - Where chunk files are written. Created if it does not exist.
/// - `translate` - An account mapping file. When given, every account is renamed through it.
/// - `max_rows` - The most rows that any single output file may hold.
/// - `dry_run` - Plan the output files but do not write them.
///
/// # Errors
/// - `Error::Format` if the export or the mapping file is malformed.
/// - `Error::UnmappedAccount` if `translate` is given and does not list an account. Nothing is
///   written in this case.
/// - `Error::Io` if a file cannot be read or written.
pub fn convert(
    input: &Path,
    output_dir: &Path,
    translate: Option<&Path>,
    max_rows: NonZeroUsize,
    dry_run: bool,
) -> Result<Out<ConvertSummary>> {
    info!("Reading input file: {}", input.display());
    let mut records = Records::load(input)?;
    let cols = MintColumns::resolve(&records)?;
    validate_accounts(&records)?;

    if let Some(translate) = translate {
        info!("Translating account names from {}", translate.display());
        let map = AccountMap::load(translate)?;
        map.translate(&mut records)?;
    }

    debug!("Converting {} rows to the Monarch format", records.len());
    let rows = records
        .iter()
        .map(|r| MonarchRow::from_mint(records.path(), &cols, r))
        .collect::<Result<Vec<_>>>()?;
    let row_count = rows.len();

    let chunks = chunk::plan(rows, max_rows);
    let message = if dry_run {
        for chunk in &chunks {
            info!(
                "Would write {} rows of {} data to {}",
                chunk.rows().len(),
                chunk.account(),
                chunk.file_name()
            );
        }
        format!(
            "Dry run: {row_count} rows would be written to {} files in {}",
            chunks.len(),
            output_dir.display()
        )
    } else {
        chunk::write(output_dir, &chunks)?;
        format!(
            "Wrote {row_count} rows to {} files in {}",
            chunks.len(),
            output_dir.display()
        )
    };

    Ok(Out::new(
        message,
        ConvertSummary {
            input: input.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            dry_run,
            rows: row_count,
            files: chunks.iter().map(|c| c.summary()).collect(),
        },
    ))
}
