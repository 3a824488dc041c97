//! Error types for the client search CLI.

use thiserror::Error;

use crate::error::QueryError;

/// Errors surfaced by the CLI parsing and execution flow.
///
/// Load failures are not listed here: they are reported as ordinary output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// An option that the tool does not define was supplied.
    #[error("invalid option: {value}")]
    InvalidOption {
        /// Option as typed by the user.
        value: String,
    },
    /// An option expected a value but none followed it.
    #[error("missing argument: {flag}")]
    MissingArgument {
        /// Option that was missing its value.
        flag: String,
    },
    /// A bare argument appeared after the command.
    #[error("unexpected argument: {value}")]
    UnexpectedArgument {
        /// Argument value that was not expected.
        value: String,
    },
    /// The query text could not be compiled.
    #[error(transparent)]
    Query {
        /// Underlying query error.
        #[from]
        source: QueryError,
    },
}
