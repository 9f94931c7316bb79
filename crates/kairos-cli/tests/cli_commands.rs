//! Integration tests for the kairos binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kairos() -> Command {
    Command::cargo_bin("kairos").unwrap()
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let output = kairos()
        .arg("run")
        .args(args)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("valid JSON output")
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_all_scenarios() {
    kairos()
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("water-bucket")
                .and(predicate::str::contains("drip"))
                .and(predicate::str::contains("weighted")),
        );
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_drip_reports_outcome() {
    kairos()
        .args(["run", "drip"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("max_duration_reached")
                .and(predicate::str::contains("at time 6"))
                .and(predicate::str::contains("2 events executed")),
        );
}

#[test]
fn run_unknown_scenario_fails() {
    kairos()
        .args(["run", "bathtub"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario"));
}

#[test]
fn run_json_is_valid() {
    let json = run_json(&["drip"]);
    assert_eq!(json["reason"], "max_duration_reached");
    assert_eq!(json["final_time"], 6);
    assert_eq!(json["executed_events"], 2);
    assert_eq!(json["state"]["values"]["n"], 2);
}

#[test]
fn run_max_duration_overrides_scenario_default() {
    let json = run_json(&["drip", "--max-duration", "12"]);
    assert_eq!(json["state"]["values"]["n"], 4);
    assert_eq!(json["final_time"], 12);
}

#[test]
fn run_output_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("outcome.json");
    kairos()
        .args(["run", "weighted", "-o", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Outcome written to"));

    let content = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        json["state"]["values"]["order"],
        serde_json::json!(["high", "low", "high", "low"])
    );
}

#[test]
fn run_timeline_lists_heavier_event_first() {
    let output = kairos()
        .args(["run", "weighted", "--timeline"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let high = stdout.find("high event").expect("high event listed");
    let low = stdout.find("low event").expect("low event listed");
    assert!(high < low);
    assert!(stdout.contains("pending"));
}

#[test]
fn run_verbose_shows_diagnostics() {
    kairos()
        .args(["run", "drip", "--verbose"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Diagnostics")
                .and(predicate::str::contains("starting simulation")),
        );
}

#[test]
fn run_same_seed_is_deterministic() {
    let a = run_json(&["water-bucket", "--seed", "7"]);
    let b = run_json(&["water-bucket", "--seed", "7"]);
    assert_eq!(a["state"]["values"], b["state"]["values"]);
    assert_eq!(a["final_time"], b["final_time"]);
    assert!(a["state"]["values"]["overflows"].as_i64().unwrap() > 0);
}
