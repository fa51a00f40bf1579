use crate::model::mapping::Mapping;
use crate::{fs, Error, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

const BOM: char = '\u{feff}';

/// The rows of a CSV file, including the header mapping and the file they came from.
///
/// All values are kept as the strings found in the file. Interpreting them is left to whoever
/// consumes the records.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Records {
    path: PathBuf,
    mapping: Mapping,
    data: Vec<Record>,
}

/// A single data row along with the line it was read from.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Record {
    line: u64,
    values: Vec<String>,
}

impl Records {
    /// Reads the CSV file at `path`. The first row must be a header.
    ///
    /// # Errors
    /// - `Error::Io` if the file cannot be opened or read.
    /// - `Error::Format` if the header is missing, a header is duplicated, or a row has a different
    ///   number of fields than the header.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading {}", path.display());
        let f = fs::open(path)?;
        Self::from_reader(path, f)
    }

    /// Like `load`, but reads from `reader`. `path` is only used for error messages.
    pub fn from_reader<R: Read>(path: impl AsRef<Path>, reader: R) -> Result<Self> {
        let path = path.as_ref();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| Error::from_csv(path, e))?
            .clone();
        if headers.is_empty() {
            return Err(Error::format(path, None, "the file has no header row"));
        }

        let header_names = headers
            .iter()
            .enumerate()
            .map(|(ix, h)| if ix == 0 { h.trim_start_matches(BOM) } else { h });
        let mapping = Mapping::new(header_names)
            .map_err(|e| Error::format(path, Some(1), e.to_string()))?;

        let mut data = Vec::new();
        for result in rdr.records() {
            let row = result.map_err(|e| Error::from_csv(path, e))?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            data.push(Record {
                line,
                values: row.iter().map(String::from).collect(),
            });
        }
        debug!("Read {} rows from {}", data.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            mapping,
            data,
        })
    }

    /// The file these records were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.data.iter_mut()
    }

    /// Returns the index of the column named `header`, or a `Format` error naming the file and
    /// the missing column.
    pub fn column(&self, header: &str) -> Result<usize> {
        self.mapping
            .require(header)
            .map_err(|e| Error::format(&self.path, Some(1), e.to_string()))
    }
}

impl Record {
    /// The 1-based line number in the file where this row started.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn get(&self, ix: usize) -> &str {
        self.values.get(ix).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, ix: usize, value: impl Into<String>) {
        if let Some(v) = self.values.get_mut(ix) {
            *v = value.into();
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}
