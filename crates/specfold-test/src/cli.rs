//! CLI regression tests for the `specfold` binary.
//!
//! These tests invoke the binary as a subprocess to catch regressions in
//! flag names, exit codes, and output formats — things the Rust API tests
//! can't catch.
//!
//! Run with: `cargo test -p specfold-test`
//! Requires the `specfold` binary to be built first (`cargo build -p specfold`).

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;
use specfold_spec_parser::Document;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns an assert_cmd Command wrapping the `specfold` binary.
fn specfold() -> Command {
    // cargo_bin is deprecated for custom build-dir setups; fine for standard workspace use.
    #[allow(deprecated)]
    Command::cargo_bin("specfold")
        .expect("specfold binary not found — run `cargo build -p specfold` first")
}

/// Absolute path to the shared test fixtures directory.
fn fixtures() -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/specfold-test
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates/")
        .parent()
        .expect("workspace root")
        .join("tests/fixtures")
}

// ---------------------------------------------------------------------------
// specfold merge
// ---------------------------------------------------------------------------

#[test]
fn merge_two_documents_writes_output() {
    let tmp = TempDir::new().expect("temp dir");
    let output = tmp.path().join("merged.yaml");

    specfold()
        .args(["merge", "--input"])
        .arg(fixtures().join("users-v3.yaml"))
        .arg(fixtures().join("petstore-v2.yaml"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).expect("output file");
    let merged: Document = serde_yaml::from_str(&written).expect("merged output parses");

    assert_eq!(merged.openapi, "3.0.1");
    // Paths from both inputs survive.
    assert!(merged.paths.contains_key("/users"));
    assert!(merged.paths.contains_key("/pets"));
    // Swagger 2 definitions arrive as component schemas.
    assert!(merged.components.schemas.contains_key("User"));
    assert!(merged.components.schemas.contains_key("Pet"));
}

#[test]
fn merge_applies_server_override() {
    let tmp = TempDir::new().expect("temp dir");
    let output = tmp.path().join("merged.yaml");

    specfold()
        .args(["merge", "--input"])
        .arg(fixtures().join("users-v3.yaml"))
        .arg("--output")
        .arg(&output)
        .args(["--servers", "https://api.example.com:Production"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).expect("output file");
    let merged: Document = serde_yaml::from_str(&written).expect("merged output parses");

    assert_eq!(merged.servers.len(), 1);
    assert_eq!(merged.servers[0].url, "https://api.example.com");
    assert_eq!(merged.servers[0].description, "Production");
    // The server declared inside users-v3.yaml is gone.
    let rendered = serde_yaml::to_string(&merged).expect("re-serialize");
    assert!(!rendered.contains("declared.example.com"));
}

#[test]
fn merge_without_servers_uses_defaults() {
    let tmp = TempDir::new().expect("temp dir");
    let output = tmp.path().join("merged.yaml");

    specfold()
        .args(["merge", "--input"])
        .arg(fixtures().join("users-v3.yaml"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).expect("output file");
    let merged: Document = serde_yaml::from_str(&written).expect("merged output parses");
    assert_eq!(merged.servers.len(), 4);
    assert_eq!(merged.servers[0].url, "https://api-dev.domain.com");
}

#[test]
fn merge_json_input_is_accepted() {
    let tmp = TempDir::new().expect("temp dir");
    let output = tmp.path().join("merged.yaml");

    specfold()
        .args(["merge", "--input"])
        .arg(fixtures().join("orders-v3.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).expect("output file");
    let merged: Document = serde_yaml::from_str(&written).expect("merged output parses");
    assert!(merged.paths.contains_key("/orders"));
}

#[test]
fn merge_missing_input_exits_one_naming_the_file() {
    let tmp = TempDir::new().expect("temp dir");

    specfold()
        .args(["merge", "--input", "this-file-does-not-exist.yaml"])
        .arg("--output")
        .arg(tmp.path().join("merged.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("this-file-does-not-exist.yaml"));
}

#[test]
fn merge_unrecognized_document_exits_one() {
    let tmp = TempDir::new().expect("temp dir");
    let output = tmp.path().join("merged.yaml");

    specfold()
        .args(["merge", "--input"])
        .arg(fixtures().join("invalid-no-version.yaml"))
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unable to detect swagger/openapi version"));

    // All-or-nothing: no partial output.
    assert!(!output.exists());
}

#[test]
fn merge_malformed_document_exits_one() {
    let tmp = TempDir::new().expect("temp dir");

    specfold()
        .args(["merge", "--input"])
        .arg(fixtures().join("invalid-parse-error.yaml"))
        .arg("--output")
        .arg(tmp.path().join("merged.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("parse error"));
}

#[test]
fn merge_missing_input_flag_exits_two() {
    // --input is required; clap returns exit code 2 for missing required args
    specfold().arg("merge").assert().failure().code(2);
}

// ---------------------------------------------------------------------------
// specfold stats
// ---------------------------------------------------------------------------

#[test]
fn stats_text_output_reports_counters() {
    specfold()
        .args(["stats", "--input"])
        .arg(fixtures().join("users-v3.yaml"))
        .arg(fixtures().join("petstore-v2.yaml"))
        .assert()
        .success()
        .stdout(contains("total_files: 2"))
        .stdout(contains("total_paths: 2"))
        .stdout(contains("total_schemas: 2"));
}

#[test]
fn stats_json_output_is_valid_json() {
    let output = specfold()
        .args(["stats", "--input"])
        .arg(fixtures().join("users-v3.yaml"))
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let s = String::from_utf8(output).expect("stdout should be valid UTF-8");
    let v: serde_json::Value =
        serde_json::from_str(&s).expect("--format json output should be valid JSON");
    assert_eq!(v["total_files"], 1);
    assert!(v.get("total_paths").is_some());
    assert!(v.get("total_tags").is_some());
}

#[test]
fn stats_missing_input_exits_one() {
    specfold()
        .args(["stats", "--input", "nope.yaml"])
        .assert()
        .failure()
        .code(1);
}

// ---------------------------------------------------------------------------
// specfold --version
// ---------------------------------------------------------------------------

#[test]
fn version_flag_prints_version() {
    specfold()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("specfold"));
}
