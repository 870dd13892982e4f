//! End-to-end tests of the command layer, driving files on disk

use std::fs;
use std::path::Path;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use tagtree::cli::{execute_command, Cli, CliError};
use tagtree::exitcode;
use tagtree::util::testing;

fn run(args: &[&str]) -> Result<(), CliError> {
    testing::init_test_setup();
    let cli = Cli::try_parse_from(std::iter::once("tagtree").chain(args.iter().copied())).unwrap();
    execute_command(&cli)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[rstest]
#[case(&["show"], "<html>\n<body>\n<ul>\n<li>\nfirst\n</li>\n")]
#[case(&["remove", "ul"], "<html>\n<body>\n<p>\nfirst\n</p>\n<p>\nsecond\n")]
#[case(&["replace", "li", "item"], "<html>\n<body>\n<ul>\n<item>\nfirst\n</item>\n")]
#[case(&["add", "FIRST", "em"], "<html>\n<body>\n<ul>\n<li>\n<em>\nfirst\n</em>\n</li>\n")]
fn given_edit_command_when_executed_then_writes_result_file(
    #[case] command: &[&str],
    #[case] expected_prefix: &str,
) {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.html");

    let mut args = command.to_vec();
    args.push("tests/resources/documents/lists.html");
    args.extend(["-o", path_str(&out)]);
    run(&args).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with(expected_prefix), "{written}");
}

#[test]
fn given_bold_row_command_when_executed_then_row_is_wrapped() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.html");
    run(&[
        "bold-row",
        "3",
        "tests/resources/documents/table.html",
        "--output",
        path_str(&out),
    ])
    .unwrap();
    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("<bold>\nr3c1\n</bold>"));
    assert!(!written.contains("<bold>\nr1c1\n</bold>"));
}

#[test]
fn given_out_of_range_row_when_executed_then_maps_to_data_error() {
    let err = run(&["bold-row", "9", "tests/resources/documents/table.html"]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_root_removal_when_executed_then_maps_to_usage_error() {
    let err = run(&["remove", "html", "tests/resources/documents/table.html"]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_missing_input_when_executed_then_maps_to_noinput() {
    let err = run(&["show", "tests/resources/documents/nope.html"]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_malformed_input_when_executed_then_maps_to_data_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.html");
    fs::write(&input, "<html>\n<b>\n</html>\n").unwrap();
    let err = run(&["show", path_str(&input)]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(err.to_string().contains("line 3"), "{err}");
}

#[test]
fn given_missing_config_when_executed_then_maps_to_config_error() {
    let err = run(&[
        "--config",
        "tests/resources/nope.toml",
        "show",
        "tests/resources/documents/table.html",
    ])
    .unwrap_err();
    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[test]
fn given_deeply_nested_input_when_showing_tree_then_maps_to_data_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("deep.html");
    let mut markup = "<div>\n".repeat(100_000);
    markup.push_str("leaf\n");
    markup.push_str(&"</div>\n".repeat(100_000));
    fs::write(&input, markup).unwrap();

    let err = run(&["tree", path_str(&input)]).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(err.to_string().contains("100001 levels"), "{err}");
}

#[test]
fn given_table_when_showing_tree_then_succeeds() {
    run(&["tree", "tests/resources/documents/table.html"]).unwrap();
}
