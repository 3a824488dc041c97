//! Case-insensitive field queries.
//!
//! The query text is compiled as a regular expression without escaping, so
//! metacharacters keep their regex meaning: `^jane` anchors, `a|b`
//! alternates. A match anywhere in the field text qualifies a record.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::{LoadFailure, QueryError};
use crate::field::FieldName;
use crate::loader::RecordSource;
use crate::record::Record;

/// A prepared query against one field.
///
/// # Example
///
/// ```
/// use client_search::{ClientQuery, Record};
///
/// let records: Vec<Record> = serde_json::from_str(
///     r#"[{"id": 1, "full_name": "John Doe"}, {"id": 2, "full_name": "Jane Smith"}]"#,
/// )
/// .expect("valid records");
///
/// let query = ClientQuery::new("name", "smith").expect("valid pattern");
/// let matches = query.run(&records).expect("in-memory records always load");
///
/// assert_eq!(matches.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ClientQuery {
    field: FieldName,
    pattern: Regex,
}

impl ClientQuery {
    /// Normalises `field` and compiles `query_text` case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPattern`] when `query_text` is not a
    /// valid regular expression.
    pub fn new(field: &str, query_text: &str) -> Result<Self, QueryError> {
        let pattern = RegexBuilder::new(query_text)
            .case_insensitive(true)
            .build()
            .map_err(|err| QueryError::InvalidPattern {
                pattern: query_text.to_owned(),
                message: err.to_string(),
            })?;

        Ok(Self {
            field: FieldName::new(field),
            pattern,
        })
    }

    /// Returns the normalised field this query inspects.
    #[must_use]
    pub const fn field(&self) -> &FieldName {
        &self.field
    }

    /// Returns the raw query text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Reports whether a single record matches.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        record
            .field_text(&self.field)
            .is_some_and(|text| self.pattern.is_match(&text))
    }

    /// Returns the matching records in source order.
    ///
    /// # Errors
    ///
    /// Returns the source's [`LoadFailure`] unchanged.
    pub fn run<S>(&self, source: &S) -> Result<Vec<Record>, LoadFailure>
    where
        S: RecordSource + ?Sized,
    {
        let records = source.records()?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let matched: Vec<Record> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        debug!(
            field = %self.field,
            pattern = self.pattern(),
            scanned = records.len(),
            matched = matched.len(),
            "query complete"
        );
        Ok(matched)
    }
}
