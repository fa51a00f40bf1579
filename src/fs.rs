use crate::{Error, Result};
use std::path::Path;

pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|e| Error::io(path, "Unable to create directory", e))
}

pub(crate) fn open(path: impl AsRef<Path>) -> Result<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::open(path).map_err(|e| Error::io(path, "Unable to open file", e))
}

pub(crate) fn create(path: impl AsRef<Path>) -> Result<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::create(path).map_err(|e| Error::io(path, "Unable to create file", e))
}

/// Opens a `csv::Writer` on a new file at `path`, truncating anything already there.
pub(crate) fn csv_writer(path: impl AsRef<Path>) -> Result<csv::Writer<std::fs::File>> {
    Ok(csv::Writer::from_writer(create(path)?))
}

/// Flushes `w`, which was writing to `path`.
pub(crate) fn finish<W>(path: impl AsRef<Path>, mut w: csv::Writer<W>) -> Result<()>
where
    W: std::io::Write,
{
    let path = path.as_ref();
    w.flush().map_err(|e| Error::io(path, "Unable to write data to", e))
}

/// Maps an error from `csv::Writer` into our `Error` for `path`.
pub(crate) fn write_err(path: impl AsRef<Path>, e: csv::Error) -> Error {
    let path = path.as_ref();
    match e.into_kind() {
        csv::ErrorKind::Io(source) => Error::io(path, "Unable to write data to", source),
        other => Error::format(path, None, format!("Unable to serialize row: {other:?}")),
    }
}

#[test]
fn create_dir_nested_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let dir = tempdir.path().join("a").join("b");
    create_dir_all(&dir).unwrap();
    assert!(dir.is_dir());
    // a second call on an existing directory is fine
    create_dir_all(&dir).unwrap();
}

#[test]
fn open_missing_file_is_io_error() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let err = open(tempdir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
