//! One-shot entry points pairing a fresh loader with an operation.
//!
//! Each call builds its own [`JsonFileLoader`], so nothing is cached across
//! calls.

use camino::Utf8Path;

use crate::duplicates::{DuplicateGroups, DuplicateSearch};
use crate::error::SearchError;
use crate::loader::{DEFAULT_DATA_FILE, JsonFileLoader, RecordSource};
use crate::query::ClientQuery;
use crate::record::Record;

/// Returns the records whose `field` matches `query_text`.
///
/// `file_path` defaults to [`DEFAULT_DATA_FILE`]. The file is loaded before
/// the pattern is compiled: a load failure or an empty record set is
/// returned as-is whatever `query_text` holds.
///
/// # Errors
///
/// Returns [`SearchError::Load`] when the data file cannot be loaded and
/// [`SearchError::Query`] when a non-empty set meets an invalid pattern.
pub fn query(
    field: &str,
    query_text: &str,
    file_path: Option<&Utf8Path>,
) -> Result<Vec<Record>, SearchError> {
    let loader = loader_for(file_path);
    let records = loader.records()?;
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let prepared = ClientQuery::new(field, query_text)?;
    Ok(prepared.run(records)?)
}

/// Returns the groups of records sharing a `field` value.
///
/// `file_path` defaults to [`DEFAULT_DATA_FILE`].
///
/// # Errors
///
/// Returns [`SearchError::Load`] when the data file cannot be loaded.
pub fn duplicates(
    field: &str,
    file_path: Option<&Utf8Path>,
) -> Result<DuplicateGroups, SearchError> {
    let loader = loader_for(file_path);
    Ok(DuplicateSearch::new(field).run(&loader)?)
}

fn loader_for(file_path: Option<&Utf8Path>) -> JsonFileLoader {
    JsonFileLoader::new(file_path.unwrap_or_else(|| Utf8Path::new(DEFAULT_DATA_FILE)))
}
