use std::path::{Path, PathBuf};

/// The errors that can stop a conversion run. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file was malformed or did not match the schema that was expected of it.
    #[error("{}{}: {message}", .path.display(), line_suffix(.line))]
    Format {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    /// Translation found an account name that the mapping file does not list.
    #[error(
        "account '{account}' (line {line}) has no entry in the mapping file {}, add it and retry",
        .mapping.display()
    )]
    UnmappedAccount {
        account: String,
        line: u64,
        mapping: PathBuf,
    },

    /// A file or directory could not be read, created or written.
    #[error("{message} {}", .path.display())]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn format(
        path: impl AsRef<Path>,
        line: Option<u64>,
        message: impl Into<String>,
    ) -> Self {
        Error::Format {
            path: path.as_ref().to_path_buf(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(
        path: impl AsRef<Path>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
            source,
        }
    }

    /// Converts a `csv` error that happened while reading `path` into either a `Format` or an
    /// `Io` error, keeping the line number when `csv` knows it.
    pub(crate) fn from_csv(path: impl AsRef<Path>, e: csv::Error) -> Self {
        let path = path.as_ref();
        let line = e.position().map(|p| p.line());
        match e.into_kind() {
            csv::ErrorKind::Io(source) => Error::io(path, "Unable to read", source),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => Error::format(
                path,
                line,
                format!("expected {expected_len} fields to match the header but found {len}"),
            ),
            csv::ErrorKind::Utf8 { err, .. } => {
                Error::format(path, line, format!("invalid UTF-8: {err}"))
            }
            other => Error::format(path, line, format!("{other:?}")),
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" (line {line})"),
        None => String::new(),
    }
}
