//! Field name normalisation.

use std::fmt;

/// Alias accepted on the command line for the canonical name field.
pub const NAME_ALIAS: &str = "name";

/// Canonical key holding a client's full name.
pub const FULL_NAME_FIELD: &str = "full_name";

/// A record field name with the `name` alias resolved.
///
/// # Example
///
/// ```
/// use client_search::FieldName;
///
/// assert_eq!(FieldName::new("name").as_str(), "full_name");
/// assert_eq!(FieldName::new("email").as_str(), "email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName(String);

impl FieldName {
    /// Normalises a caller-supplied field name.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        if raw == NAME_ALIAS {
            Self(FULL_NAME_FIELD.to_owned())
        } else {
            Self(raw.to_owned())
        }
    }

    /// Returns the canonical field key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
