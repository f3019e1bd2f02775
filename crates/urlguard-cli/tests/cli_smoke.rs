//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `urlguard` binary end-to-end: argument
//! parsing, training to disk, and classifying with the written model.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("urlguard").unwrap()
}

fn write_dataset(dir: &Path) -> String {
    let mut csv = String::from("url,label\n");
    for i in 0..30 {
        writeln!(csv, "https://www.shop{}.com/catalog/item{},0", i, i).unwrap();
        writeln!(csv, "https://198.51.100.{}/secure-login/verify,1", i).unwrap();
    }
    let path = dir.join("urls.csv");
    fs::write(&path, csv).unwrap();
    path.to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("urlguard"));
}

// ---------------------------------------------------------------------------
// extract
// ---------------------------------------------------------------------------

#[test]
fn extract_prints_feature_json() {
    cmd()
        .args(["extract", "https://bit.ly/free-login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_shortened\": 1"))
        .stdout(predicate::str::contains("\"has_suspicious_words\": 1"));
}

// ---------------------------------------------------------------------------
// train / classify
// ---------------------------------------------------------------------------

#[test]
fn train_missing_dataset_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["train", "-d", "absent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dataset not found"));
}

#[test]
fn train_nonexistent_config_fails() {
    cmd()
        .args(["train", "/nonexistent/config.json"])
        .assert()
        .failure();
}

#[test]
fn train_then_classify() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(dir.path());
    let model = dir.path().join("model.urlguard");
    let report = dir.path().join("report.html");

    cmd()
        .args(["train", "-d", &dataset, "--n-trees", "10", "--seed", "7"])
        .arg("-o")
        .arg(&model)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Model trained with accuracy"))
        .stderr(predicate::str::contains("No config file provided"));

    assert!(model.is_file());
    assert!(fs::read_to_string(&report).unwrap().contains("Confusion matrix"));

    cmd()
        .arg("classify")
        .arg("-m")
        .arg(&model)
        .args(["http://example.com", "https://www.example.com/"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "http://example.com\tSuspicious (No HTTPS found)",
        ))
        .stdout(predicate::str::contains("https://www.example.com/\t"));
}

#[test]
fn train_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(dir.path());
    let model = dir.path().join("from_config.urlguard");
    let config = dir.path().join("train.json");
    let json = serde_json::json!({
        "dataset": dataset,
        "output_file": model.to_str().unwrap(),
        "forest": { "n_trees": 5 }
    });
    fs::write(&config, json.to_string()).unwrap();

    cmd()
        .arg("train")
        .arg(&config)
        .assert()
        .success();
    assert!(model.is_file());
}

#[test]
fn classify_with_missing_model_fails() {
    cmd()
        .args(["classify", "-m", "/nonexistent/model.urlguard", "https://a.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load model"));
}
