//! Integration tests for the account OCR CLI.
//!
//! These tests run the actual binary against fixture files copied into a
//! temporary directory and compare the generated output files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Copy the named fixtures into a fresh temporary directory
fn stage(fixtures: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in fixtures {
        fs::copy(test_data_path(name), dir.path().join(name)).unwrap();
    }
    dir
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_use_case_one_output_file() {
    let dir = stage(&["use_case_one.data"]);

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Parsed 11 account numbers from use_case_one.data.",
        ));

    let output = read(&dir.path().join("use_case_one.out"));
    let expected = read(Path::new(&test_data_path("use_case_one.out")));
    assert_eq!(output, expected);
}

#[test]
fn test_statuses_output_file() {
    let dir = stage(&["statuses.data"]);

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("86110??36 ILL"));

    let output = read(&dir.path().join("statuses.out"));
    assert_eq!(output, "457508000\n664371495 ERR\n86110??36 ILL\n");
}

#[test]
fn test_separate_destination_directory() {
    let dir = stage(&["statuses.data"]);
    let dest = dir.path().join("decoded");

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .arg(&dest)
        .assert()
        .success();

    assert!(dest.join("statuses.out").is_file());
    assert!(!dir.path().join("statuses.out").exists());
}

#[test]
fn test_single_file_source() {
    let dir = stage(&["statuses.data"]);

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path().join("statuses.data"))
        .assert()
        .success();

    assert!(dir.path().join("statuses.out").is_file());
}

#[test]
fn test_malformed_file_fails_without_output() {
    let dir = stage(&["malformed.data", "use_case_one.data"]);

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("123456789"))
        .stderr(predicate::str::contains("27 characters wide"));

    assert!(!dir.path().join("malformed.out").exists());
    // sibling files still processed
    assert!(dir.path().join("use_case_one.out").is_file());

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| !name.ends_with(".data") && !name.ends_with(".out"))
        .collect();
    assert!(leftovers.is_empty(), "stray files: {:?}", leftovers);
}

#[test]
fn test_quiet_suppresses_entries() {
    let dir = stage(&["statuses.data"]);

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("664371495").not());
}

#[test]
fn test_no_matching_files() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No account number *.data files found.",
        ));
}

#[test]
fn test_custom_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        test_data_path("statuses.data"),
        dir.path().join("statuses.scan"),
    )
    .unwrap();

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .args(["--extension", "scan"])
        .assert()
        .success();

    assert!(dir.path().join("statuses.out").is_file());
}

#[test]
fn test_output_extension_as_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("statuses.out");
    fs::copy(test_data_path("statuses.data"), &source).unwrap();
    let before = read(&source);

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .args(["--extension", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("would overwrite its source"));

    assert_eq!(read(&source), before);
}

#[test]
fn test_missing_source_error() {
    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg("nonexistent-dir")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source path not found"));
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = stage(&["use_case_one.data"]);
    let out = dir.path().join("use_case_one.out");

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .assert()
        .success();
    let first = read(&out);

    Command::cargo_bin("account-ocr")
        .unwrap()
        .arg(dir.path())
        .assert()
        .success();
    assert_eq!(read(&out), first);
}
