//! Unit tests for the client search CLI helpers.

use std::sync::atomic::{AtomicUsize, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use rstest::{fixture, rstest};

use super::*;
use crate::error::QueryError;
use crate::report::NO_RESULTS_MESSAGE;

const CLIENTS_JSON: &str = r#"[
    {"id": 1, "full_name": "John Doe", "email": "john.doe@gmail.com"},
    {"id": 2, "full_name": "Jane Smith", "email": "jane.smith@yahoo.com"},
    {"id": 3, "full_name": "John Doe", "email": "john.d@outlook.com"},
    {"id": 15, "full_name": "Another Jane Smith", "email": "jane.smith@yahoo.com"}
]"#;

struct DataFixture {
    dir: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl DataFixture {
    fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Drop for DataFixture {
    fn drop(&mut self) {
        if let Ok(root) = Dir::open_ambient_dir(".", ambient_authority()) {
            drop(root.remove_dir_all(&self.dir));
        }
    }
}

fn write_data(contents: &str) -> DataFixture {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = Utf8PathBuf::from("target")
        .join("client-search-unit")
        .join(format!("cli-{}-{counter}", std::process::id()));
    let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open cwd");
    root.create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("clients.json");
    root.write(&path, contents).expect("write data file");
    DataFixture { dir, path }
}

#[fixture]
fn clients_file() -> DataFixture {
    write_data(CLIENTS_JSON)
}

fn args(values: &[&str]) -> impl Iterator<Item = String> {
    values
        .iter()
        .map(|value| (*value).to_owned())
        .collect::<Vec<_>>()
        .into_iter()
}

fn run_cli(values: &[&str]) -> Result<String, CliError> {
    match parse_args(args(values))? {
        ParseOutcome::Request(request) => execute(&request, &SearchSettings::default()),
        other => panic!("expected a request, got {other:?}"),
    }
}

#[rstest]
#[case::no_command(&[])]
#[case::unknown_command(&["invalid_command"])]
#[case::help_flag(&["--help"])]
#[case::help_after_command(&["query", "-h"])]
fn parse_args_returns_help(#[case] values: &[&str]) {
    let outcome = parse_args(args(values)).expect("parse args");

    assert_eq!(outcome, ParseOutcome::Help);
}

#[rstest]
#[case::query_without_options(&["query"], Command::Query)]
#[case::query_without_field(&["query", "--query", "Name"], Command::Query)]
#[case::query_without_query(&["query", "--field", "name"], Command::Query)]
#[case::duplicates_without_field(&["duplicates"], Command::Duplicates)]
#[case::duplicates_with_only_path(&["duplicates", "-p", "x.json"], Command::Duplicates)]
fn parse_args_returns_command_usage(#[case] values: &[&str], #[case] command: Command) {
    let outcome = parse_args(args(values)).expect("parse args");

    assert_eq!(outcome, ParseOutcome::Usage(command));
}

#[rstest]
#[case("--field")]
#[case("-f")]
#[case("--query")]
#[case("-q")]
#[case("--file-path")]
#[case("-p")]
fn parse_args_reports_missing_argument(#[case] flag: &str) {
    let err = parse_args(args(&["query", flag])).expect_err("expected error");

    assert_eq!(
        err,
        CliError::MissingArgument {
            flag: flag.to_owned(),
        }
    );
    assert_eq!(err.to_string(), format!("missing argument: {flag}"));
}

#[test]
fn parse_args_reports_invalid_option() {
    let err = parse_args(args(&["duplicates", "--fieldx", "id"])).expect_err("expected error");

    assert_eq!(
        err,
        CliError::InvalidOption {
            value: "--fieldx".to_owned(),
        }
    );
    assert_eq!(err.to_string(), "invalid option: --fieldx");
}

#[test]
fn parse_args_reports_unexpected_argument() {
    let err =
        parse_args(args(&["duplicates", "--field", "email", "extra"])).expect_err("expected error");

    assert_eq!(
        err,
        CliError::UnexpectedArgument {
            value: "extra".to_owned(),
        }
    );
}

#[test]
fn parse_args_parses_full_query() {
    let outcome = parse_args(args(&[
        "query",
        "--field",
        "email",
        "--query",
        "smith@yahoo",
        "--file-path",
        "archive/clients.json",
    ]))
    .expect("parse args");

    assert_eq!(
        outcome,
        ParseOutcome::Request(Request::Query {
            field: "email".to_owned(),
            query: "smith@yahoo".to_owned(),
            file_path: Some(Utf8PathBuf::from("archive/clients.json")),
        })
    );
}

#[test]
fn parse_args_accepts_inline_values() {
    let outcome = parse_args(args(&["query", "--field=name", "--query=a=b", "--file-path=x.json"]))
        .expect("parse args");

    assert_eq!(
        outcome,
        ParseOutcome::Request(Request::Query {
            field: "name".to_owned(),
            query: "a=b".to_owned(),
            file_path: Some(Utf8PathBuf::from("x.json")),
        })
    );
}

#[test]
fn parse_args_ignores_query_for_duplicates() {
    let outcome =
        parse_args(args(&["duplicates", "-f", "email", "-q", "ignored"])).expect("parse args");

    assert_eq!(
        outcome,
        ParseOutcome::Request(Request::Duplicates {
            field: "email".to_owned(),
            file_path: None,
        })
    );
}

#[test]
fn parse_args_keeps_last_repeated_value() {
    let outcome =
        parse_args(args(&["duplicates", "-f", "email", "-f", "name"])).expect("parse args");

    let ParseOutcome::Request(request) = outcome else {
        panic!("expected request");
    };
    assert_eq!(request.command(), Command::Duplicates);
    assert_eq!(
        request,
        Request::Duplicates {
            field: "name".to_owned(),
            file_path: None,
        }
    );
}

#[rstest]
fn execute_prints_matched_clients(clients_file: DataFixture) {
    let output = run_cli(&[
        "query",
        "--field",
        "name",
        "--query",
        "mit",
        "--file-path",
        clients_file.path().as_str(),
    ])
    .expect("query runs");

    assert_eq!(
        output,
        "ID: 2, Name: Jane Smith, Email: jane.smith@yahoo.com\n\
         ID: 15, Name: Another Jane Smith, Email: jane.smith@yahoo.com"
    );
}

#[rstest]
fn execute_prints_no_results_for_unmatched_query(clients_file: DataFixture) {
    let output = run_cli(&["query", "-f", "email", "-q", "smiths", "-p", clients_file.path().as_str()])
        .expect("query runs");

    assert_eq!(output, NO_RESULTS_MESSAGE);
}

#[rstest]
fn execute_prints_duplicate_groups(clients_file: DataFixture) {
    let output = run_cli(&["duplicates", "-f", "name", "-p", clients_file.path().as_str()])
        .expect("duplicates run");

    assert_eq!(
        output,
        "ID: 1, Name: John Doe, Email: john.doe@gmail.com\n\
         ID: 3, Name: John Doe, Email: john.d@outlook.com"
    );
}

#[rstest]
fn execute_rejects_invalid_patterns(clients_file: DataFixture) {
    let err = run_cli(&["query", "-f", "name", "-q", "[", "-p", clients_file.path().as_str()])
        .expect_err("pattern should fail");

    assert!(matches!(
        err,
        CliError::Query {
            source: QueryError::InvalidPattern { .. }
        }
    ));
}

#[rstest]
#[case::query(&["query", "-f", "name", "-q", "smith"])]
#[case::duplicates(&["duplicates", "-f", "email"])]
fn execute_reports_missing_file(#[case] values: &[&str]) {
    let mut full: Vec<&str> = values.to_vec();
    full.extend(["-p", "target/client-search-unit/missing_file"]);

    let output = run_cli(&full).expect("load failures are output");

    assert_eq!(output, "JSON file cannot be found!");
}

#[rstest]
#[case::query(&["query", "-f", "name", "-q", "smith"])]
#[case::duplicates(&["duplicates", "-f", "email"])]
fn execute_reports_invalid_file(#[case] values: &[&str]) {
    let invalid = write_data("[{\"id\": 1,]");
    let mut full: Vec<&str> = values.to_vec();
    full.extend(["-p", invalid.path().as_str()]);

    let output = run_cli(&full).expect("load failures are output");

    assert_eq!(output, "JSON file cannot be parsed!");
}

#[rstest]
fn execute_uses_settings_when_no_path_is_given(clients_file: DataFixture) {
    let request = Request::Duplicates {
        field: "email".to_owned(),
        file_path: None,
    };
    let settings = SearchSettings {
        data_file: Some(clients_file.path().as_std_path().to_path_buf()),
    };

    let output = execute(&request, &settings).expect("duplicates run");

    assert!(output.contains("ID: 2, Name: Jane Smith"));
    assert!(output.contains("ID: 15, Name: Another Jane Smith"));
}

#[test]
fn command_usage_lines_name_required_options() {
    assert!(Command::Query.usage().contains("--query=KEYWORD"));
    assert!(!Command::Duplicates.usage().contains("--query"));
    assert!(GENERAL_USAGE.contains("-p, --file-path FILE_PATH"));
}

#[rstest]
#[case::separate(&["query", "-f", "name", "-q", "smith"])]
#[case::attached(&["query", "-fname", "-qsmith"])]
#[case::mixed(&["query", "-fname", "--query=smith"])]
fn parse_args_accepts_attached_short_values(#[case] values: &[&str]) {
    let outcome = parse_args(args(values)).expect("parse args");

    assert_eq!(
        outcome,
        ParseOutcome::Request(Request::Query {
            field: "name".to_owned(),
            query: "smith".to_owned(),
            file_path: None,
        })
    );
}

#[test]
fn parse_args_reads_attached_file_path() {
    let outcome = parse_args(args(&["duplicates", "-femail", "-pclients.json"])).expect("parse args");

    assert_eq!(
        outcome,
        ParseOutcome::Request(Request::Duplicates {
            field: "email".to_owned(),
            file_path: Some(Utf8PathBuf::from("clients.json")),
        })
    );
}

#[rstest]
#[case::invalid_option(&["query", "--fieldx", "id"], "invalid option: --fieldx")]
#[case::missing_argument(&["duplicates", "--field"], "missing argument: --field")]
fn run_prints_cli_errors_on_stdout_and_fails(#[case] values: &[&str], #[case] expected: &str) {
    let output = run(args(values), SearchSettings::default);

    assert_eq!(
        output,
        CliOutput {
            text: expected.to_owned(),
            is_success: false,
        }
    );
}

#[rstest]
#[case::help(&["--help"], GENERAL_USAGE.trim_end())]
#[case::usage(&["duplicates"], Command::Duplicates.usage())]
#[case::missing_file(
    &["query", "-f", "name", "-q", "(", "-p", "target/client-search-unit/missing_file"],
    "JSON file cannot be found!"
)]
fn run_succeeds_with_informational_output(#[case] values: &[&str], #[case] expected: &str) {
    let output = run(args(values), SearchSettings::default);

    assert!(output.is_success);
    assert_eq!(output.text, expected);
}

#[test]
fn run_loads_settings_only_for_requests() {
    let output = run(args(&["query"]), || panic!("settings should not load"));

    assert!(output.is_success);
}

#[test]
fn execute_ignores_invalid_pattern_for_empty_file() {
    let empty = write_data("[]");
    let request = Request::Query {
        field: "name".to_owned(),
        query: "(".to_owned(),
        file_path: Some(empty.path().to_path_buf()),
    };

    let output = execute(&request, &SearchSettings::default()).expect("empty set short-circuits");

    assert_eq!(output, NO_RESULTS_MESSAGE);
}
