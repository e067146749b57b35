//! Integration tests for the insight CLI commands.
//!
//! Everything here runs offline: the failure paths fire before any network
//! activity, and `show` only reads a local file.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

// Helper function to create a clean command instance
fn insight() -> Command { Command::cargo_bin("insight").unwrap() }

#[test]
fn test_fetch_rejects_unrecognizable_input() {
  insight().arg("fetch").arg("not-a-url").arg("--api-key").arg("test-key").assert().failure();
}

#[test]
fn test_file_rejects_missing_path() {
  insight()
    .arg("file")
    .arg("definitely/does/not/exist.pdf")
    .arg("--api-key")
    .arg("test-key")
    .assert()
    .failure();
}

#[test]
fn test_file_rejects_invalid_pdf() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("not_a_paper.pdf");
  std::fs::write(&path, b"plain text pretending to be a PDF").unwrap();

  // Extraction fails before the credential is ever used.
  insight().arg("file").arg(&path).arg("--api-key").arg("test-key").assert().failure();
  dir.close().unwrap();
}

#[test]
fn test_show_renders_sections_and_sentinel() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("paper_analysis_20240601_093000.json");
  std::fs::write(
    &path,
    r#"{
  "source": "ArXiv ID: 2301.00001",
  "timestamp": "2024-06-01 09:30:00",
  "analysis": {
    "background": "Testing ground for the presenter."
  }
}"#,
  )
  .unwrap();

  insight()
    .arg("show")
    .arg(&path)
    .assert()
    .success()
    .stdout(predicate::str::contains("ArXiv ID: 2301.00001"))
    .stdout(predicate::str::contains("Background of the Study"))
    .stdout(predicate::str::contains("Testing ground for the presenter."))
    .stdout(predicate::str::contains("Achievements and Significance"))
    .stdout(predicate::str::contains("Not available"));
  dir.close().unwrap();
}

#[test]
fn test_show_rejects_malformed_report() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("broken.json");
  std::fs::write(&path, b"{ not json").unwrap();

  insight().arg("show").arg(&path).assert().failure();
  dir.close().unwrap();
}
