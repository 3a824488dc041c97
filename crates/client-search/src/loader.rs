//! Loading client records from a JSON file.
//!
//! The loader opens the file with ambient authority, following symlinks the
//! way a shell would, and decodes it as a JSON array of objects. The outcome is
//! memoised, so a loader shared by several operations touches the filesystem
//! at most once.

use std::cell::OnceCell;
use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::File};
use tracing::{debug, warn};

use crate::error::LoadFailure;
use crate::record::Record;

/// Data file used when the caller supplies no path.
pub const DEFAULT_DATA_FILE: &str = "data/clients.json";

/// Supplies the record set an operation scans.
pub trait RecordSource {
    /// Returns every record in source order, or the reason none are
    /// available.
    ///
    /// # Errors
    ///
    /// Returns [`LoadFailure`] when the records cannot be produced.
    fn records(&self) -> Result<&[Record], LoadFailure>;
}

impl RecordSource for [Record] {
    fn records(&self) -> Result<&[Record], LoadFailure> {
        Ok(self)
    }
}

impl RecordSource for Vec<Record> {
    fn records(&self) -> Result<&[Record], LoadFailure> {
        Ok(self.as_slice())
    }
}

/// Memoising loader for a JSON data file.
///
/// # Example
///
/// ```no_run
/// use client_search::{JsonFileLoader, RecordSource};
///
/// let loader = JsonFileLoader::new("data/clients.json");
/// match loader.records() {
///     Ok(records) => println!("{} clients", records.len()),
///     Err(failure) => println!("{failure}"),
/// }
/// ```
#[derive(Debug)]
pub struct JsonFileLoader {
    path: Utf8PathBuf,
    loaded: OnceCell<Result<Vec<Record>, LoadFailure>>,
}

impl JsonFileLoader {
    /// Creates a loader for `path`. Nothing is read until records are
    /// requested.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceCell::new(),
        }
    }

    /// Creates a loader for [`DEFAULT_DATA_FILE`].
    #[must_use]
    pub fn with_default_path() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }

    /// Returns the path this loader reads.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl RecordSource for JsonFileLoader {
    fn records(&self) -> Result<&[Record], LoadFailure> {
        match self.loaded.get_or_init(|| load_records(&self.path)) {
            Ok(records) => Ok(records.as_slice()),
            Err(failure) => Err(failure.clone()),
        }
    }
}

fn load_records(path: &Utf8Path) -> Result<Vec<Record>, LoadFailure> {
    let result = read_contents(path).and_then(|contents| decode_records(path, &contents));
    match &result {
        Ok(records) => debug!(path = %path, count = records.len(), "client records loaded"),
        Err(failure) => warn!(path = %path, error = ?failure, "client records unavailable"),
    }
    result
}

fn read_contents(path: &Utf8Path) -> Result<String, LoadFailure> {
    let mut file =
        File::open_ambient(path, ambient_authority()).map_err(|err| not_found(path, &err))?;
    let mut payload = Vec::new();
    file.read_to_end(&mut payload).map_err(|err| not_found(path, &err))?;

    String::from_utf8(payload).map_err(|err| LoadFailure::FileInvalid {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn decode_records(path: &Utf8Path, contents: &str) -> Result<Vec<Record>, LoadFailure> {
    serde_json::from_str(contents).map_err(|err| LoadFailure::FileInvalid {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn not_found(path: &Utf8Path, err: &io::Error) -> LoadFailure {
    debug!(path = %path, error = %err, "client data file unreadable");
    LoadFailure::FileNotFound {
        path: path.to_path_buf(),
    }
}
