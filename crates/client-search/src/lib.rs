//! Query and duplicate detection over a JSON file of client records.
//!
//! This crate loads a JSON array of client objects and runs one of two
//! read-only operations against a chosen field. Both operations receive their
//! records through [`RecordSource`], so a single memoised [`JsonFileLoader`]
//! can be shared between them.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading client records, with missing and unparsable files reported as
//!   [`LoadFailure`] values
//! - Case-insensitive regular expression queries on a field
//! - Grouping records that share a field value
//! - Resolving the `name` field alias to `full_name`
//!
//! # Example
//!
//! ```
//! use client_search::{ClientQuery, DuplicateSearch, Record};
//!
//! let records: Vec<Record> = serde_json::from_str(r#"[
//!     {"id": 1, "full_name": "John Doe", "email": "a@x.com"},
//!     {"id": 2, "full_name": "Jane Smith", "email": "b@y.com"},
//!     {"id": 3, "full_name": "John Doe", "email": "c@z.com"}
//! ]"#)
//! .expect("valid records");
//!
//! let query = ClientQuery::new("name", "smith").expect("valid pattern");
//! assert_eq!(query.run(&records).expect("loaded").len(), 1);
//!
//! let groups = DuplicateSearch::new("name").run(&records).expect("loaded");
//! assert_eq!(groups.len(), 1);
//! ```

mod duplicates;
mod error;
mod field;
mod loader;
mod query;
mod record;
pub mod report;
pub mod search;
pub mod search_cli;
mod settings;

pub use duplicates::{DuplicateGroup, DuplicateGroups, DuplicateSearch};
pub use error::{LoadFailure, QueryError, SearchError};
pub use field::{FULL_NAME_FIELD, FieldName, NAME_ALIAS};
pub use loader::{DEFAULT_DATA_FILE, JsonFileLoader, RecordSource};
pub use query::ClientQuery;
pub use record::Record;
pub use settings::SearchSettings;
