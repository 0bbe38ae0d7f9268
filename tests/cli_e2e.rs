//! CLI end-to-end tests driving the compiled binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn simdupe() -> Command {
    Command::cargo_bin("simdupe").unwrap()
}

fn repeated_text() -> String {
    let mut out = String::new();
    for i in 0..200 {
        out.push_str(&format!("log entry {i}: service heartbeat acknowledged\n"));
    }
    out
}

#[test]
fn print_default_config_emits_parseable_yaml() {
    let output = simdupe()
        .arg("print-default-config")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let yaml: serde_yaml::Value = serde_yaml::from_slice(&output).unwrap();
    assert!(yaml.get("threshold").is_some());
    assert!(yaml.get("min_size").is_some());
}

#[test]
fn scan_outputs_json_with_one_cluster() {
    let dir = tempdir().unwrap();
    let text = repeated_text();
    fs::write(dir.path().join("a.txt"), &text).unwrap();
    fs::write(dir.path().join("b.txt"), &text).unwrap();

    let output = simdupe()
        .arg("scan")
        .arg("--min-size")
        .arg("0")
        .arg("--format")
        .arg("json")
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["clusters"].as_array().unwrap().len(), 1);
    assert_eq!(report["stats"]["files_scanned"], 2);
}

#[test]
fn scan_rejects_conflicting_threshold_flags() {
    simdupe()
        .arg("scan")
        .arg("--threshold")
        .arg("8")
        .arg("--similarity")
        .arg("0.9")
        .arg(".")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn validate_config_accepts_a_valid_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("simdupe.yml");
    fs::write(&path, "threshold: 8\nmin_size: 512\n").unwrap();

    simdupe()
        .arg("validate-config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn validate_config_rejects_a_bad_band_count() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("simdupe.yml");
    fs::write(&path, "band_count: 5\n").unwrap();

    simdupe().arg("validate-config").arg(&path).assert().failure();
}
