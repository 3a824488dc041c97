//! Plain-text rendering of search outcomes.

use crate::duplicates::DuplicateGroups;
use crate::field::FULL_NAME_FIELD;
use crate::record::{Record, value_text};

/// Message printed when an operation finds nothing.
pub const NO_RESULTS_MESSAGE: &str = "Your query yielded no results.";

/// Formats one record as `ID: <id>, Name: <full_name>, Email: <email>`.
///
/// Absent values render as empty text.
///
/// # Example
///
/// ```
/// use client_search::{Record, report::record_line};
///
/// let record: Record = serde_json::from_str(
///     r#"{"id": 2, "full_name": "Jane Smith", "email": "jane.smith@yahoo.com"}"#,
/// )
/// .expect("valid record");
///
/// assert_eq!(
///     record_line(&record),
///     "ID: 2, Name: Jane Smith, Email: jane.smith@yahoo.com"
/// );
/// ```
#[must_use]
pub fn record_line(record: &Record) -> String {
    format!(
        "ID: {}, Name: {}, Email: {}",
        text_of(record, "id"),
        text_of(record, FULL_NAME_FIELD),
        text_of(record, "email")
    )
}

/// Renders query matches one per line.
#[must_use]
pub fn render_records(records: &[Record]) -> String {
    if records.is_empty() {
        return NO_RESULTS_MESSAGE.to_owned();
    }
    records
        .iter()
        .map(record_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders duplicate groups, separating groups with a blank line.
#[must_use]
pub fn render_groups(groups: &DuplicateGroups) -> String {
    if groups.is_empty() {
        return NO_RESULTS_MESSAGE.to_owned();
    }
    groups
        .iter()
        .map(|group| render_records(group.records()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn text_of(record: &Record, key: &str) -> String {
    record
        .value(key)
        .and_then(value_text)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default()
}
