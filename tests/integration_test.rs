//! Integration tests for the transaction analyzer CLI.
//!
//! These tests run the actual binary against files in `tests/data`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given input file and return stdout
fn run_analyzer(input_file: &str) -> String {
    let mut cmd = Command::cargo_bin("transaction-analyzer").unwrap();
    let assert = cmd.arg(input_file).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_json_report_matches_expected() {
    let output = run_analyzer(&test_data_path("transactions.json"));
    let expected = fs::read_to_string(test_data_path("expected_report.txt")).unwrap();

    assert_eq!(output.trim_end(), expected.trim_end());
}

#[test]
fn test_csv_and_json_produce_same_report() {
    let json_output = run_analyzer(&test_data_path("transactions.json"));
    let csv_output = run_analyzer(&test_data_path("transactions.csv"));

    assert_eq!(json_output, csv_output);
}

#[test]
fn test_empty_input_reports_na() {
    let output = run_analyzer(&test_data_path("empty.json"));

    assert!(output.contains("transactions: 0"));
    assert!(output.contains("average amount: n/a"));
    assert!(output.contains("busiest month: n/a"));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("transaction-analyzer").unwrap();
    cmd.arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("transaction-analyzer").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_unsupported_extension_error() {
    let mut cmd = Command::cargo_bin("transaction-analyzer").unwrap();
    cmd.arg("transactions.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported input format"));
}

#[test]
fn test_malformed_amount_aborts_load() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[{{"transaction_id": "1", "transaction_date": "2019-01-01",
            "transaction_amount": "ten", "transaction_type": "debit",
            "transaction_description": "x", "merchant_name": "y", "card_type": "z"}}]"#
    )
    .unwrap();
    file.flush().unwrap();

    let mut cmd = Command::cargo_bin("transaction-analyzer").unwrap();
    cmd.arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Malformed record at index 0: transaction_amount",
        ));
}

#[test]
fn test_invalid_json_aborts_load() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{ not json").unwrap();
    file.flush().unwrap();

    let mut cmd = Command::cargo_bin("transaction-analyzer").unwrap();
    cmd.arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON parsing error"));
}
