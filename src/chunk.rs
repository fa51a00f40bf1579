//! Splitting converted rows into per-account files of bounded size.

use crate::model::MonarchRow;
use crate::{fs, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Monarch's importer struggles with very large files.
pub const MAX_ROWS_DEFAULT: usize = 5000;

const FILE_PREFIX: &str = "monarch";
const SLUG_MAX_LEN: usize = 50;
const EMPTY_SLUG: &str = "account";
const PREVIEW_ROWS: usize = 5;

/// Up to `max_rows` rows for a single account, and the file they will be written to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chunk {
    account: String,
    index: usize,
    file_name: String,
    rows: Vec<MonarchRow>,
}

impl Chunk {
    pub fn account(&self) -> &str {
        &self.account
    }

    /// The number used in the file name. Starts at 0 for each account and is only bumped past a
    /// name that is already taken.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn rows(&self) -> &[MonarchRow] {
        &self.rows
    }

    pub fn summary(&self) -> ChunkSummary {
        ChunkSummary {
            account: self.account.clone(),
            file_name: self.file_name.clone(),
            rows: self.rows.len(),
        }
    }
}

/// What was (or would be) written for a chunk.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ChunkSummary {
    pub account: String,
    pub file_name: String,
    pub rows: usize,
}

/// Groups `rows` by account, keeping the order of rows within each account. Accounts are returned
/// in the order they first appear.
pub fn group_by_account(rows: Vec<MonarchRow>) -> Vec<(String, Vec<MonarchRow>)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<MonarchRow>)> = Vec::new();
    for row in rows {
        match positions.get(row.account()).copied() {
            Some(ix) => groups[ix].1.push(row),
            None => {
                positions.insert(row.account().to_string(), groups.len());
                groups.push((row.account().to_string(), vec![row]));
            }
        }
    }
    groups
}

/// Groups `rows` by account and splits each group into chunks of at most `max_rows`, assigning
/// every chunk a file name that is unique within the returned list.
pub fn plan(rows: Vec<MonarchRow>, max_rows: NonZeroUsize) -> Vec<Chunk> {
    let mut names = FileNames::default();
    let mut chunks = Vec::new();
    for (account, rows) in group_by_account(rows) {
        let slug = slugify(&account);
        let mut next = 0;
        for piece in rows.chunks(max_rows.get()) {
            let (index, file_name) = names.claim(&slug, next);
            next = index + 1;
            chunks.push(Chunk {
                account: account.clone(),
                index,
                file_name,
                rows: piece.to_vec(),
            });
        }
    }
    chunks
}

/// Writes each chunk to its own CSV file in `dir`, creating `dir` if needed. Files that already
/// exist with the same name are overwritten.
///
/// If any chunk fails, the files written so far by this call are removed before the error is
/// returned.
pub fn write(dir: impl AsRef<Path>, chunks: &[Chunk]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let path = dir.join(chunk.file_name());
        if let Err(e) = write_chunk(&path, chunk) {
            // the failed file may be half written
            paths.push(path);
            remove_written(&paths);
            return Err(e);
        }
        paths.push(path);
    }
    Ok(paths)
}

fn write_chunk(path: &Path, chunk: &Chunk) -> Result<()> {
    let mut w = fs::csv_writer(path)?;
    for row in chunk.rows() {
        w.serialize(row).map_err(|e| fs::write_err(path, e))?;
    }
    fs::finish(path, w)?;
    info!(
        "Writing {} rows of {} data to {}",
        chunk.rows().len(),
        chunk.account(),
        chunk.file_name()
    );
    for row in chunk.rows().iter().take(PREVIEW_ROWS) {
        debug!("{}: {row:?}", chunk.file_name());
    }
    Ok(())
}

fn remove_written(paths: &[PathBuf]) {
    for path in paths.iter().filter(|p| p.is_file()) {
        match std::fs::remove_file(path) {
            Ok(()) => debug!("Removed partial output {}", path.display()),
            Err(e) => warn!("Unable to remove partial output {}: {e}", path.display()),
        }
    }
}

/// Tracks the file names handed out so far so that two accounts with the same slug do not clobber
/// each other.
#[derive(Debug, Default)]
struct FileNames {
    used: HashSet<String>,
}

impl FileNames {
    /// Returns the first free `(index, name)` for `slug`, starting at `start`.
    fn claim(&mut self, slug: &str, start: usize) -> (usize, String) {
        let mut index = start;
        loop {
            let name = file_name(slug, index);
            if self.used.insert(name.clone()) {
                return (index, name);
            }
            index += 1;
        }
    }
}

fn file_name(slug: &str, index: usize) -> String {
    format!("{FILE_PREFIX}-{slug}-{index}.csv")
}

/// Transliterates `s` to lowercase ascii and joins its words with `-`, so `Crédit Agricole`
/// becomes `credit-agricole`.
pub fn slugify(s: impl AsRef<str>) -> String {
    let mut slug = slug::slugify(s);
    // slug output is ascii, so byte truncation is safe
    slug.truncate(SLUG_MAX_LEN);
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}
