//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the availability,
//! services, and summary subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, windowing, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the availability.json fixture.
fn availability_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/availability.json")
}

/// Helper: path to the services.json fixture.
fn services_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/services.json")
}

fn run_json(args: &[&str]) -> Value {
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args(args)
        .output()
        .expect("slots should run");
    assert!(output.status.success(), "slots {:?} failed", args);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

fn values(timeline: &Value) -> Vec<Value> {
    timeline
        .as_array()
        .expect("timeSlots must be an array")
        .iter()
        .map(|interval| interval["value"].clone())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Availability subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn availability_from_file() {
    let out = run_json(&["availability", "-i", availability_json_path()]);

    let dimensions = out.as_array().unwrap();
    assert_eq!(dimensions.len(), 2);
    assert_eq!(dimensions[0]["dimensionId"], "a0B000000000001");
    assert_eq!(
        values(&dimensions[0]["timeSlots"]),
        vec!["Closed", "Reservation", "Open", "Closed"]
    );
    assert_eq!(values(&dimensions[1]["timeSlots"]), vec!["Closed"]);
}

#[test]
fn availability_drop_closed_removes_closed_dimension() {
    let out = run_json(&[
        "availability",
        "-i",
        availability_json_path(),
        "--drop-closed",
    ]);

    let dimensions = out.as_array().unwrap();
    assert_eq!(dimensions.len(), 1);
    assert_eq!(dimensions[0]["dimensionId"], "a0B000000000001");
}

#[test]
fn availability_window_clips_timeline() {
    let out = run_json(&[
        "availability",
        "-i",
        availability_json_path(),
        "--window-start",
        "2022-01-01T10:00:00Z",
        "--window-end",
        "2022-01-01T14:00:00Z",
    ]);

    let first = &out[0]["timeSlots"];
    assert_eq!(values(first), vec!["Reservation", "Open"]);
    assert_eq!(
        first[0]["start"].as_str().unwrap().parse::<chrono::DateTime<chrono::Utc>>().unwrap(),
        "2022-01-01T10:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap()
    );
}

#[test]
fn availability_stdin_to_stdout() {
    let input = r#"{"dimensionId":"x","timeSlots":[
        {"dataObject":{"slotType":"Open"},"startTime":"2022-01-01T08:00:00Z","endTime":"2022-01-01T09:00:00Z"}
    ]}"#;

    Command::cargo_bin("slots")
        .unwrap()
        .args(["availability", "--compact"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""dimensionId":"x""#))
        .stdout(predicate::str::contains(r#""value":"Open""#));
}

#[test]
fn availability_to_file() {
    let output_path = std::env::temp_dir().join("slots-test-availability-output.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("slots")
        .unwrap()
        .args(["availability", "-i", availability_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.contains("a0B000000000002"));

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn unknown_slot_type_fails() {
    let input = r#"{"dimensionId":"x","timeSlots":[
        {"dataObject":{"slotType":"Tentative"},"startTime":"2022-01-01T08:00:00Z","endTime":"2022-01-01T09:00:00Z"}
    ]}"#;

    Command::cargo_bin("slots")
        .unwrap()
        .arg("availability")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tentative"));
}

#[test]
fn invalid_json_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .arg("availability")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to build availability timelines"));
}

#[test]
fn inverted_window_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "availability",
            "-i",
            availability_json_path(),
            "--window-start",
            "2022-01-01T14:00:00Z",
            "--window-end",
            "2022-01-01T10:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--window-start must be before"));
}

#[test]
fn window_start_requires_window_end() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "availability",
            "-i",
            availability_json_path(),
            "--window-start",
            "2022-01-01T14:00:00Z",
        ])
        .assert()
        .failure();
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["availability", "-i", "/nonexistent/slots.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Services subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn services_from_file() {
    let out = run_json(&["services", "-i", services_json_path()]);

    let services = out[0]["services"].as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["name"], "Coffee");
    assert_eq!(services[0]["id"], "a0S000000000001");
    assert_eq!(
        values(&services[0]["timeSlots"]),
        vec![10, 5, 0, 5, 0, 5, 10]
    );
}

#[test]
fn services_window_clips_each_service() {
    let out = run_json(&[
        "services",
        "-i",
        services_json_path(),
        "--window-start",
        "2022-01-01T09:00:00Z",
        "--window-end",
        "2022-01-01T11:00:00Z",
    ]);

    assert_eq!(values(&out[0]["services"][0]["timeSlots"]), vec![5, 0]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Summary subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn summary_reports_each_dimension() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["summary", "-i", availability_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("a0B000000000001: 4 intervals, open"))
        .stdout(predicate::str::contains("a0B000000000002: 1 intervals, closed"));
}

#[test]
fn debug_logs_go_to_stderr() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["-vv", "availability", "-i", availability_json_path()])
        .assert()
        .success()
        .stderr(predicate::str::contains("built timeline"))
        .stdout(predicate::str::contains("built timeline").not());
}

#[test]
fn no_subcommand_shows_usage() {
    Command::cargo_bin("slots")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
