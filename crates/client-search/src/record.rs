//! Client records decoded from the data file.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::FieldName;

/// One client entry: a mapping from field name to JSON value.
///
/// Records carry no schema. A key that is missing and a key holding `null`
/// are both treated as an absent field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Returns the value stored under `key`, ignoring `null`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Returns the value of a normalised field, ignoring `null`.
    #[must_use]
    pub fn field(&self, field: &FieldName) -> Option<&Value> {
        self.value(field.as_str())
    }

    /// Returns the text used when matching a field against a query.
    ///
    /// Strings are returned as-is; numbers and booleans use their JSON
    /// text. Arrays and objects have no text.
    #[must_use]
    pub fn field_text(&self, field: &FieldName) -> Option<Cow<'_, str>> {
        self.field(field).and_then(value_text)
    }

    /// Returns the underlying key/value map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub(crate) fn value_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
