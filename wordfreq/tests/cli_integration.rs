//! Integration tests for the wordfreq CLI

use std::fs;
use std::process::Command;

use tempfile::tempdir;

const BASE: &str = "This is a test string. This is a second test string";

fn fixtures() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../wordfreqlib/tests/fixtures").to_string()
}

fn run_wordfreq(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_wordfreq"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute wordfreq");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let mut all = args.to_vec();
    all.extend(["--output", "json"]);
    let (stdout, stderr, success) = run_wordfreq(&all);
    assert!(success, "wordfreq failed: {}", stderr);
    serde_json::from_str(&stdout).expect("Invalid JSON output")
}

fn tokens(report: &serde_json::Value) -> Vec<String> {
    report["entries"]
        .as_array()
        .expect("entries array")
        .iter()
        .map(|e| e["token"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_wordfreq(&["--help"]);

    assert!(success);
    assert!(stdout.contains("wordfreq"));
    assert!(stdout.contains("--black-list"));
    assert!(stdout.contains("--substitution-file"));
    assert!(stdout.contains("--sort-frequency"));
    assert!(stdout.contains("--output"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_wordfreq(&["--version"]);

    assert!(success);
    assert!(stdout.contains("wordfreq"));
}

#[test]
fn test_table_output() {
    let (stdout, _, success) = run_wordfreq(&[BASE]);

    assert!(success);
    assert!(stdout.contains("Token"));
    assert!(stdout.contains("Count"));
    assert!(stdout.contains("string."));
    assert!(stdout.contains("Total (7 unique)"));
}

#[test]
fn test_json_output() {
    let report = run_json(&[BASE, "--sort-frequency", "desc"]);

    assert_eq!(report["total"], 11);
    assert_eq!(report["unique"], 7);
    assert_eq!(report["entries"][0]["token"], "This");
    assert_eq!(report["entries"][0]["count"], 2);
    assert!(report["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_top_limits_rows() {
    let report = run_json(&[BASE, "--sort-frequency", "desc", "--top", "2"]);

    assert_eq!(tokens(&report), vec!["This", "a"]);
    assert_eq!(report["unique"], 7);
}

#[test]
fn test_black_list_file() {
    let assets = format!("{}/assets", fixtures());
    let report = run_json(&[
        BASE,
        "--assets",
        &assets,
        "--black-list-file",
        "blacklist_en.txt",
        "--substitution-file",
        "punctuation_en.json",
        "--sort-token",
        "asc",
    ]);

    assert_eq!(tokens(&report), vec!["second", "string", "test"]);
}

#[test]
fn test_white_list_regex_and_case() {
    let report = run_json(&[
        BASE,
        "--case",
        "upper",
        "--white-list-regex",
        "#^T#",
        "--sort-token",
        "asc",
    ]);

    assert_eq!(tokens(&report), vec!["TEST", "THIS"]);
}

#[test]
fn test_records_with_select_and_where() {
    let records = format!("{}/testdata.json", fixtures());
    let report = run_json(&[
        "--records",
        &records,
        "--select",
        "col1,col2,col3",
        "--where",
        "id=3",
        "--sort-token",
        "asc",
    ]);

    assert_eq!(
        tokens(&report),
        vec!["This", "a", "is", "second", "string", "string.", "test"]
    );
    assert_eq!(report["total"], 11);
}

#[test]
fn test_source_file_and_delimiter() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("words.txt");
    fs::write(&file, "red,green\nred, 12 ,blue\n").unwrap();

    let report = run_json(&[
        "--source-file",
        file.to_str().unwrap(),
        "-d",
        ",",
        "--remove-numeric",
        "--sort-frequency",
        "desc",
    ]);

    assert_eq!(tokens(&report), vec!["red", "blue", "green"]);
}

#[test]
fn test_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("wordfreq.json");
    fs::write(
        &config,
        r#"{"black_list": {"terms": ["this", "is"]}, "sort_by_token": "desc"}"#,
    )
    .unwrap();

    let report = run_json(&[BASE, "--config", config.to_str().unwrap()]);
    assert_eq!(
        tokens(&report),
        vec!["test", "string.", "string", "second", "a"]
    );
}

#[test]
fn test_unused_filter_warning() {
    let report = run_json(&[BASE, "--black-list", "this", "--stages", "white"]);

    assert_eq!(
        report["warnings"][0],
        "Blacklist defined but not used"
    );
}

#[test]
fn test_missing_source_file() {
    let (_, stderr, success) = run_wordfreq(&["--source-file", "/nonexistent/words.txt"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("/nonexistent/words.txt"));
}

#[test]
fn test_invalid_pattern() {
    let (_, stderr, success) = run_wordfreq(&[BASE, "--black-list-regex", "#(#"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_select_requires_records() {
    let (_, stderr, success) = run_wordfreq(&["--select", "col1"]);

    assert!(!success);
    assert!(stderr.contains("--records"));
}
