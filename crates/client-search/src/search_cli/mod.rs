//! CLI support for querying client records.
//!
//! This module provides parsing and execution helpers for the
//! `client-search` binary. The binary delegates to these functions so they
//! can be exercised in tests without spawning a subprocess.

mod error;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

pub use self::error::CliError;
use crate::error::SearchError;
use crate::report::{render_groups, render_records};
use crate::search;
use crate::settings::SearchSettings;

/// General usage text, printed for `--help` or an unknown command.
pub const GENERAL_USAGE: &str = concat!(
    "Usage: client-search query|duplicates [options]\n",
    "    -f, --field FIELD                Field name to search\n",
    "    -q, --query VALUE                Keyword to search for\n",
    "    -p, --file-path FILE_PATH        Optional path to file\n",
    "    -h, --help                       Print this help output\n",
);

/// The operation selected by the first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Match records against a pattern.
    Query,
    /// Group records sharing a field value.
    Duplicates,
}

impl Command {
    /// Returns the usage line printed when required options are missing.
    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Query => {
                "Usage: client-search query --field=<name|email> --query=KEYWORD --file-path=FILE_PATH"
            }
            Self::Duplicates => {
                "Usage: client-search duplicates --field=<name|email> --file-path=FILE_PATH"
            }
        }
    }

    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "query" => Some(Self::Query),
            "duplicates" => Some(Self::Duplicates),
            _ => None,
        }
    }
}

/// A validated request ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Match `field` against the `query` pattern.
    Query {
        /// Field to inspect, before alias normalisation.
        field: String,
        /// Raw pattern text.
        query: String,
        /// Data file override.
        file_path: Option<Utf8PathBuf>,
    },
    /// Group records on `field`.
    Duplicates {
        /// Field to group on, before alias normalisation.
        field: String,
        /// Data file override.
        file_path: Option<Utf8PathBuf>,
    },
}

impl Request {
    /// Returns the command this request runs.
    #[must_use]
    pub const fn command(&self) -> Command {
        match self {
            Self::Query { .. } => Command::Query,
            Self::Duplicates { .. } => Command::Duplicates,
        }
    }

    /// Returns the data file supplied on the command line, if any.
    #[must_use]
    pub fn file_path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Query { file_path, .. } | Self::Duplicates { file_path, .. } => {
                file_path.as_deref()
            }
        }
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show the general usage and exit successfully.
    Help,
    /// Show the usage line for a command whose options are incomplete.
    Usage(Command),
    /// Continue with the parsed request.
    Request(Request),
}

const SHORT_FLAGS: [&str; 3] = ["-f", "-q", "-p"];

#[derive(Debug, Clone, Copy)]
enum Flag {
    Field,
    Query,
    FilePath,
}

impl Flag {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "-f" | "--field" => Some(Self::Field),
            "-q" | "--query" => Some(Self::Query),
            "-p" | "--file-path" => Some(Self::FilePath),
            _ => None,
        }
    }
}

/// Text and exit status produced by one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOutput {
    /// Text to write to stdout.
    pub text: String,
    /// Whether the process exits successfully.
    pub is_success: bool,
}

/// Parses `args`, runs the request, and returns what the binary prints.
///
/// Every outcome is printed on stdout. Only a [`CliError`] makes the exit
/// status a failure; load failures are ordinary output. Settings are loaded
/// only once a request is ready to run.
#[must_use]
pub fn run<I, F>(args: I, load_settings: F) -> CliOutput
where
    I: Iterator<Item = String>,
    F: FnOnce() -> SearchSettings,
{
    let result = parse_args(args).and_then(|outcome| match outcome {
        ParseOutcome::Help => Ok(GENERAL_USAGE.trim_end().to_owned()),
        ParseOutcome::Usage(command) => Ok(command.usage().to_owned()),
        ParseOutcome::Request(request) => execute(&request, &load_settings()),
    });

    match result {
        Ok(text) => CliOutput {
            text,
            is_success: true,
        },
        Err(err) => CliOutput {
            text: err.to_string(),
            is_success: false,
        },
    }
}

/// Parses CLI arguments (without the program name) into a request.
///
/// A missing or unknown command yields [`ParseOutcome::Help`]; a command
/// lacking its required options yields [`ParseOutcome::Usage`].
///
/// # Errors
///
/// Returns [`CliError`] for unknown options, options missing their value,
/// and stray positional arguments.
///
/// # Example
///
/// ```
/// use client_search::search_cli::{ParseOutcome, Request, parse_args};
///
/// let args = ["query", "--field", "name", "-q", "smith"].map(String::from);
///
/// let outcome = parse_args(args.into_iter()).expect("parse args");
/// let ParseOutcome::Request(Request::Query { field, query, .. }) = outcome else {
///     panic!("expected a query request");
/// };
///
/// assert_eq!((field.as_str(), query.as_str()), ("name", "smith"));
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let Some(command) = args.next().as_deref().and_then(Command::from_arg) else {
        return Ok(ParseOutcome::Help);
    };

    let mut field: Option<String> = None;
    let mut query: Option<String> = None;
    let mut file_path: Option<Utf8PathBuf> = None;

    while let Some(arg) = args.next() {
        if arg == "-h" || arg == "--help" {
            return Ok(ParseOutcome::Help);
        }

        let (name, inline_value) = split_inline_value(&arg);
        let Some(flag) = Flag::from_name(&name) else {
            return Err(if arg.starts_with('-') {
                CliError::InvalidOption { value: arg }
            } else {
                CliError::UnexpectedArgument { value: arg }
            });
        };
        let value = match inline_value {
            Some(value) => value,
            None => next_value(&mut args, name)?,
        };

        match flag {
            Flag::Field => field = Some(value),
            Flag::Query => query = Some(value),
            Flag::FilePath => file_path = Some(Utf8PathBuf::from(value)),
        }
    }

    let outcome = match (command, field, query) {
        (Command::Query, Some(field_name), Some(query_text)) => {
            ParseOutcome::Request(Request::Query {
                field: field_name,
                query: query_text,
                file_path,
            })
        }
        (Command::Duplicates, Some(field_name), query_text) => {
            if query_text.is_some() {
                debug!("ignoring --query for the duplicates command");
            }
            ParseOutcome::Request(Request::Duplicates {
                field: field_name,
                file_path,
            })
        }
        (incomplete, _, _) => ParseOutcome::Usage(incomplete),
    };
    Ok(outcome)
}

/// Runs a parsed request and returns the text to print.
///
/// The data file is taken from the request, then from `settings`. Load
/// failures are rendered as their message rather than returned as errors.
///
/// # Errors
///
/// Returns [`CliError::Query`] when the query pattern does not compile.
pub fn execute(request: &Request, settings: &SearchSettings) -> Result<String, CliError> {
    let data_file = request
        .file_path()
        .map_or_else(|| settings.data_file(), Utf8Path::to_path_buf);
    debug!(command = ?request.command(), data_file = %data_file, "executing search");

    let rendered = match request {
        Request::Query { field, query, .. } => search::query(field, query, Some(data_file.as_path()))
            .map(|records| render_records(&records)),
        Request::Duplicates { field, .. } => search::duplicates(field, Some(data_file.as_path()))
            .map(|groups| render_groups(&groups)),
    };

    match rendered {
        Ok(text) => Ok(text),
        Err(SearchError::Load(failure)) => Ok(failure.to_string()),
        Err(SearchError::Query(source)) => Err(CliError::Query { source }),
    }
}

fn split_inline_value(arg: &str) -> (String, Option<String>) {
    if arg.starts_with("--") {
        return match arg.split_once('=') {
            Some((name, value)) => (name.to_owned(), Some(value.to_owned())),
            None => (arg.to_owned(), None),
        };
    }

    // Short flags may carry their value attached, as in `-fname`.
    SHORT_FLAGS
        .iter()
        .find_map(|short| {
            arg.strip_prefix(short)
                .filter(|value| !value.is_empty())
                .map(|value| ((*short).to_owned(), Some(value.to_owned())))
        })
        .unwrap_or_else(|| (arg.to_owned(), None))
}

fn next_value<I>(args: &mut I, flag: String) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingArgument { flag })
}

#[cfg(test)]
mod tests;
