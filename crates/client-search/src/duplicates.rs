//! Duplicate detection by field value.
//!
//! Records are grouped on the exact JSON value of a field. Records without
//! the field never form a group. Only groups with two or more members are
//! kept, ordered by where each value first appears in the source.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_json::Value;
use tracing::debug;

use crate::error::LoadFailure;
use crate::field::FieldName;
use crate::loader::RecordSource;
use crate::record::Record;

/// Records sharing one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    value: Value,
    records: Vec<Record>,
}

impl DuplicateGroup {
    /// Returns the shared field value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the members in source order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// Duplicate groups in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DuplicateGroups(Vec<DuplicateGroup>);

impl DuplicateGroups {
    /// Returns `true` when no value is shared by two records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the groups in first-occurrence order.
    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateGroup> {
        self.0.iter()
    }

    /// Returns the members of the group for `value`, if it has one.
    #[must_use]
    pub fn get(&self, value: &Value) -> Option<&[Record]> {
        self.0
            .iter()
            .find(|group| &group.value == value)
            .map(DuplicateGroup::records)
    }
}

impl<'a> IntoIterator for &'a DuplicateGroups {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for DuplicateGroups {
    type Item = DuplicateGroup;
    type IntoIter = std::vec::IntoIter<DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A prepared duplicate search on one field.
///
/// # Example
///
/// ```
/// use client_search::{DuplicateSearch, Record};
/// use serde_json::json;
///
/// let records: Vec<Record> = serde_json::from_value(json!([
///     {"id": 1, "full_name": "John Doe"},
///     {"id": 2, "full_name": "Jane Smith"},
///     {"id": 3, "full_name": "John Doe"}
/// ]))
/// .expect("valid records");
///
/// let groups = DuplicateSearch::new("name").run(&records).expect("in-memory records");
///
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups.get(&json!("John Doe")).map(<[Record]>::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSearch {
    field: FieldName,
}

impl DuplicateSearch {
    /// Normalises `field` for grouping.
    #[must_use]
    pub fn new(field: &str) -> Self {
        Self {
            field: FieldName::new(field),
        }
    }

    /// Returns the normalised field this search groups on.
    #[must_use]
    pub const fn field(&self) -> &FieldName {
        &self.field
    }

    /// Groups the source's records and keeps values shared by two or more.
    ///
    /// # Errors
    ///
    /// Returns the source's [`LoadFailure`] unchanged.
    pub fn run<S>(&self, source: &S) -> Result<DuplicateGroups, LoadFailure>
    where
        S: RecordSource + ?Sized,
    {
        let records = source.records()?;
        if records.is_empty() {
            return Ok(DuplicateGroups::default());
        }

        let mut groups = group_by_value(records, &self.field);
        groups.retain(|group| group.records.len() > 1);
        debug!(
            field = %self.field,
            scanned = records.len(),
            groups = groups.len(),
            "duplicate search complete"
        );
        Ok(DuplicateGroups(groups))
    }
}

fn group_by_value(records: &[Record], field: &FieldName) -> Vec<DuplicateGroup> {
    // Keyed on serialised JSON so `1` and `"1"` stay distinct.
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for record in records {
        let Some(value) = record.field(field) else {
            continue;
        };
        match positions.entry(value.to_string()) {
            Entry::Occupied(slot) => {
                if let Some(group) = groups.get_mut(*slot.get()) {
                    group.records.push(record.clone());
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(DuplicateGroup {
                    value: value.clone(),
                    records: vec![record.clone()],
                });
            }
        }
    }

    groups
}
