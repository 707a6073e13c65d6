//! CLI smoke tests for texpress.
//!
//! These tests verify that the CLI commands run without panicking and
//! return appropriate exit codes. Compilation itself is exercised through
//! fake compiler scripts; no TeX distribution is required.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the texpress binary.
fn texpress_cmd() -> Command {
  cargo_bin_cmd!("texpress")
}

/// Create a temp directory with a trivial source document.
fn temp_source() -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(
    temp.path().join("main.tex"),
    "\\documentclass{article}\\begin{document}hi\\end{document}",
  )
  .unwrap();
  temp
}

/// Write a fake compiler that produces the derived artifact.
#[cfg(unix)]
fn fake_compiler(temp: &TempDir) -> std::path::PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = temp.path().join("fakelatex");
  std::fs::write(&path, "#!/bin/sh\nprintf '%%PDF-1.4 fake' > main.pdf\n").unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  texpress_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  texpress_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("texpress"));
}

#[test]
fn subcommand_help_works() {
  for sub in ["build", "install", "status"] {
    texpress_cmd()
      .args([sub, "--help"])
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// Build
// =============================================================================

#[test]
fn build_missing_source_fails() {
  let temp = TempDir::new().unwrap();
  texpress_cmd()
    .current_dir(temp.path())
    .args(["build", "ghost.tex"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("source file not found"));
}

#[test]
fn build_missing_tool_points_at_install() {
  let temp = temp_source();
  texpress_cmd()
    .current_dir(temp.path())
    .args(["build", "main.tex", "--tool", "/no/such/compiler"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("texpress install"));
}

#[test]
#[cfg(unix)]
fn build_with_fake_compiler_succeeds() {
  let temp = temp_source();
  let tool = fake_compiler(&temp);

  texpress_cmd()
    .current_dir(temp.path())
    .args(["build", "main.tex", "--tool"])
    .arg(&tool)
    .assert()
    .success()
    .stdout(predicate::str::contains("artifact"));

  // Exactly one timestamped artifact, working copy cleaned up
  let promoted: Vec<_> = std::fs::read_dir(temp.path().join("out"))
    .unwrap()
    .map(|e| e.unwrap().file_name().into_string().unwrap())
    .collect();
  assert_eq!(promoted.len(), 1);
  assert!(promoted[0].starts_with("main_"));
  assert!(promoted[0].ends_with(".pdf"));
  assert!(!temp.path().join("main.pdf").exists());
}

#[test]
#[cfg(unix)]
fn build_json_output_parses() {
  let temp = temp_source();
  let tool = fake_compiler(&temp);

  let assert = texpress_cmd()
    .current_dir(temp.path())
    .args(["build", "main.tex", "--format", "json", "--tool"])
    .arg(&tool)
    .assert()
    .success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert_eq!(result["success"], true);
  assert_eq!(result["attempts"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Install & Status
// =============================================================================

#[test]
fn install_without_tty_requires_yes() {
  texpress_cmd()
    .arg("install")
    .assert()
    .failure()
    .stderr(predicate::str::contains("--yes"));
}

#[test]
fn status_runs() {
  texpress_cmd().arg("status").assert().success();
}

#[test]
fn status_json_parses() {
  let assert = texpress_cmd().args(["status", "--format", "json"]).assert().success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert!(report["os"].is_string());
  assert!(report["hostname"].is_string());
}
