//! Error types for the client-search crate.
//!
//! Load failures are values, not panics: both operations hand them back to
//! the caller unchanged so the CLI can report them as ordinary outcomes.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Reasons a client data file could not be turned into records.
///
/// Only two kinds are modelled. Every I/O problem counts as the file not
/// being found, and every decoding problem counts as the file being invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    /// The path does not resolve to a readable file.
    #[error("JSON file cannot be found!")]
    FileNotFound {
        /// Path that was requested.
        path: Utf8PathBuf,
    },

    /// The file was read but is not a JSON array of objects.
    #[error("JSON file cannot be parsed!")]
    FileInvalid {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Description of the decoding error.
        message: String,
    },
}

impl LoadFailure {
    /// Returns the path the failed load was attempted against.
    #[must_use]
    pub const fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::FileNotFound { path } | Self::FileInvalid { path, .. } => path,
        }
    }
}

/// Errors raised while preparing a query, before any data is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query text does not compile as a regular expression.
    #[error("invalid query pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Raw query text supplied by the caller.
        pattern: String,
        /// Compiler error message.
        message: String,
    },
}

/// Errors returned by the one-shot helpers in [`crate::search`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The data file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadFailure),

    /// The query could not be prepared.
    #[error(transparent)]
    Query(#[from] QueryError),
}
