//! Integration tests for the `fncodec` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the encode,
//! decode and pattern subcommands through the actual binary, including
//! stdin piping, schema files, inline schemas and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

const PICKLE_NAME: &str =
    "pkls/n_data_000100_n_bins_001_conf_-0.50_c_0.40_n_sim_001000000.pickle";

/// Helper: path to the pickle_schema.json fixture.
fn schema_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/pickle_schema.json")
}

/// Helper: path to the values.json fixture.
fn values_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/values.json")
}

fn fncodec() -> Command {
    Command::cargo_bin("fncodec").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Encode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn encode_stdin_to_stdout() {
    let input = std::fs::read_to_string(values_path()).expect("values.json fixture must exist");

    fncodec()
        .args(["encode", "--schema", schema_path()])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(format!("{PICKLE_NAME}\n"));
}

#[test]
fn encode_values_file() {
    fncodec()
        .args(["encode", "-s", schema_path(), "-i", values_path()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pkls/n_data_000100"));
}

#[test]
fn encode_inline_values_and_schema() {
    fncodec()
        .args([
            "encode",
            "--schema-json",
            r#"{"postfix": ".csv", "fields": {"s": "fp2.3", "m": "8str"}}"#,
            "--values",
            r#"{"s": 2.345, "m": "abc"}"#,
        ])
        .assert()
        .success()
        .stdout("s_02.345_m_00000abc.csv\n");
}

#[test]
fn encode_missing_field_fails() {
    fncodec()
        .args(["encode", "--schema", schema_path(), "--values", r#"{"n_data": 1}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing fields: n_bins, conf, c, n_sim"));
}

#[test]
fn encode_unknown_field_fails() {
    fncodec()
        .args([
            "encode",
            "--schema-json",
            r#"{"fields": {"g": "4int"}}"#,
            "--values",
            r#"{"g": 1, "h": 2}"#,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown fields: h"));
}

#[test]
fn encode_invalid_json_fails() {
    fncodec()
        .args(["encode", "--schema", schema_path()])
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decode_single_name_pretty() {
    let output = fncodec()
        .args(["decode", "--schema", schema_path(), PICKLE_NAME])
        .output()
        .expect("decode should run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains('\n'), "single decode should be pretty-printed");
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["conf"], serde_json::json!(-0.5));
    assert_eq!(value["n_sim"], serde_json::json!(1_000_000));
}

#[test]
fn decode_names_from_stdin_as_json_lines() {
    let schema = r#"{"fields": {"g": "4int", "b": "bool"}}"#;
    let output = fncodec()
        .args(["decode", "--schema-json", schema])
        .write_stdin("g_0012_b_True\n\ng_-001_b_False\n")
        .output()
        .expect("decode should run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![
            serde_json::json!({"g": 12, "b": true}),
            serde_json::json!({"g": -1, "b": false}),
        ]
    );
}

#[test]
fn decode_mismatch_fails() {
    fncodec()
        .args(["decode", "--schema", schema_path(), "pkls/other.pickle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match pattern"));
}

#[test]
fn encode_decode_roundtrip() {
    let encode_output = fncodec()
        .args(["encode", "-s", schema_path(), "-i", values_path()])
        .output()
        .expect("encode should succeed");
    let name = String::from_utf8(encode_output.stdout).unwrap();

    let decode_output = fncodec()
        .args(["decode", "-s", schema_path(), name.trim()])
        .output()
        .expect("decode should succeed");
    let decoded: serde_json::Value = serde_json::from_slice(&decode_output.stdout).unwrap();

    let original: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(values_path()).unwrap()).unwrap();
    assert_eq!(decoded, original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern subcommand and schema errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn pattern_prints_composite() {
    fncodec()
        .args(["pattern", "--schema-json", r#"{"postfix": ".csv", "fields": {"b": "bool"}}"#])
        .assert()
        .success()
        .stdout("b_(True|False)\\.csv\n");
}

#[test]
fn invalid_format_in_schema_fails() {
    fncodec()
        .args(["pattern", "--schema-json", r#"{"fields": {"x": "float"}}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format 'float'"));
}

#[test]
fn missing_schema_file_fails() {
    fncodec()
        .args(["pattern", "--schema", "/nonexistent/schema.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read schema file"));
}

#[test]
fn schema_is_required() {
    fncodec().arg("pattern").assert().failure();
}

#[test]
fn verbose_logs_to_stderr() {
    fncodec()
        .args(["-v", "pattern", "--schema", schema_path()])
        .assert()
        .success()
        .stderr(predicate::str::contains("compiled record codec"));
}
