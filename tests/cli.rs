//! End-to-end tests for the tripclock binary

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/onebike_fall_back.json");

/// An empty config file keeps runs independent of the user's own settings
fn empty_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("tripclock.toml");
    fs::write(&path, "").unwrap();
    path
}

fn tripclock(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tripclock");
    cmd.arg("--config").arg(empty_config(dir));
    cmd
}

#[test]
fn test_durations_from_file() {
    let tmp_dir = TempDir::new().unwrap();
    tripclock(&tmp_dir)
        .arg("durations")
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("2017-10-01 15:23:25 -> 2017-10-01 15:26:26  181s"))
        .stdout(predicate::str::contains("2017-11-05 01:56:50 -> 2017-11-05 01:01:04  254s"))
        .stdout(predicate::str::contains("total: 13941s"));
}

#[test]
fn test_durations_from_stdin_as_json() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tripclock(&tmp_dir)
        .args(["durations", "-o", "json"])
        .write_stdin(r#"[["2017-10-01 15:23:25", "2017-10-01 15:26:26"]]"#)
        .output()
        .unwrap();

    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["records"][0]["seconds"], 181);
    assert_eq!(doc["summary"]["trips"], 1);
}

#[test]
fn test_durations_with_zone_and_format_flags() {
    let tmp_dir = TempDir::new().unwrap();
    let trips = tmp_dir.path().join("london.json");
    // London falls back at 02:00 BST on 2017-10-29
    fs::write(&trips, r#"[["10/29/2017 01:50:00", "10/29/2017 01:10:00"]]"#).unwrap();

    tripclock(&tmp_dir)
        .arg("durations")
        .arg(&trips)
        .args(["--zone", "Europe/London", "--format", "%m/%d/%Y %H:%M:%S"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1200s"));
}

#[test]
fn test_durations_reports_failures_per_trip() {
    let tmp_dir = TempDir::new().unwrap();
    tripclock(&tmp_dir)
        .arg("durations")
        .write_stdin(r#"[["2017-10-01 15:23:25", "later"], ["2017-10-01 15:23:25", "2017-10-01 15:26:26"]]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Trip could not be resolved"))
        .stdout(predicate::str::contains("181s"))
        .stdout(predicate::str::contains("failed: 1"));
}

#[test]
fn test_durations_strict_fails() {
    let tmp_dir = TempDir::new().unwrap();
    tripclock(&tmp_dir)
        .args(["durations", "--strict"])
        .write_stdin(r#"[["2017-10-01 15:23:25", "later"]]"#)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("strict mode"));
}

#[test]
fn test_unknown_zone_fails() {
    let tmp_dir = TempDir::new().unwrap();
    tripclock(&tmp_dir)
        .arg("durations")
        .arg(FIXTURE)
        .args(["-z", "America/Gotham"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("America/Gotham"));
}

#[test]
fn test_gaps_command() {
    let tmp_dir = TempDir::new().unwrap();
    tripclock(&tmp_dir)
        .arg("gaps")
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("2017-10-01 15:26:26 -> 2017-10-01 15:42:57  991s"))
        .stdout(predicate::str::contains("gaps: 6  failed: 0"));
}

#[test]
fn test_ambiguous_command() {
    let tmp_dir = TempDir::new().unwrap();
    tripclock(&tmp_dir)
        .arg("ambiguous")
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("ambiguous start"))
        .stdout(predicate::str::contains("ambiguous end"))
        .stdout(predicate::str::contains("second: 2017-11-05T06:01:04+00:00"));
}

#[test]
fn test_resolve_command() {
    let tmp_dir = TempDir::new().unwrap();
    tripclock(&tmp_dir)
        .args(["resolve", "2017-11-05 01:30:00", "--second", "--to", "Europe/London", "--to", "Asia/Kolkata"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unix:      1509863400"))
        .stdout(predicate::str::contains("Europe/London: 2017-11-05T06:30:00+00:00"))
        .stdout(predicate::str::contains("Asia/Kolkata: 2017-11-05T12:00:00+05:30"));
}

#[test]
fn test_resolve_nonexistent_time_fails() {
    let tmp_dir = TempDir::new().unwrap();
    tripclock(&tmp_dir)
        .args(["resolve", "2017-03-12 02:30:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_config_file_sets_zone() {
    let tmp_dir = TempDir::new().unwrap();
    let config = tmp_dir.path().join("custom.toml");
    fs::write(&config, "[calculator]\nzone = \"UTC\"\n").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("tripclock")
        .arg("--config")
        .arg(&config)
        .args(["resolve", "2017-10-01 15:23:25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UTC:       2017-10-01T15:23:25+00:00"));
}

#[test]
fn test_init_config_writes_file() {
    let tmp_dir = TempDir::new().unwrap();
    let target = tmp_dir.path().join("conf").join("config.toml");

    tripclock(&tmp_dir)
        .arg("init-config")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated default configuration file"));

    let content = fs::read_to_string(&target).unwrap();
    assert!(content.contains("[calculator]"));
    assert!(content.contains("timestamp_format"));
}
