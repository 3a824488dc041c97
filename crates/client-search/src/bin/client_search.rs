//! Client search CLI for querying a JSON file of client records.
//!
//! This binary delegates to `client_search::search_cli` for parsing and
//! execution, keeping the CLI behaviour testable without spawning a process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use client_search::SearchSettings;
use client_search::search_cli::run;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    init_tracing();
    let output = run(env::args().skip(1), SearchSettings::load_or_default);
    write_output(&output.text);
    if output.is_success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_tracing() {
    // Logs go to stderr; stdout carries results and CLI errors.
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }
}

fn write_output(message: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{message}") {
        drop(err);
    }
}
