//! End-to-end CLI integration tests using test fixtures.
//!
//! Each fixture in `tests/fixtures/` contains:
//! - `settings.toml` with the repository's rule settings
//! - `pull_request.json` (merge check) or `changes.json` (push check); neither means validate
//! - `expected.report.json` with the expected report (`__TIMESTAMP__` / `__VERSION__` placeholders)
//!
//! All fixtures share `tests/fixtures/directory.json` and the repository `PROJ/app`.

use assert_cmd::Command;
use branchgate_test_util::normalize_nondeterministic;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const REPOSITORY: &str = "PROJ/app";

/// Helper to get a Command for the branchgate binary.
#[allow(deprecated)]
fn branchgate_cmd() -> Command {
    Command::cargo_bin("branchgate").expect("branchgate binary not found - run `cargo build` first")
}

/// Get the path to the test fixtures directory
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("branchgate-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

/// Build the command matching the fixture's inputs.
fn fixture_command(fixture: &Path, report_path: &Path) -> Command {
    let mut cmd = branchgate_cmd();
    cmd.arg("--settings")
        .arg(fixture.join("settings.toml"))
        .arg("--directory")
        .arg(fixtures_dir().join("directory.json"));

    if fixture.join("pull_request.json").exists() {
        cmd.arg("merge-check")
            .arg("--pull-request")
            .arg(fixture.join("pull_request.json"));
    } else if fixture.join("changes.json").exists() {
        cmd.args(["push-check", "--repository", REPOSITORY])
            .arg("--changes")
            .arg(fixture.join("changes.json"));
    } else {
        cmd.args(["validate", "--repository", REPOSITORY]);
    }
    cmd.arg("--report-out").arg(report_path);
    cmd
}

/// Run the CLI against a fixture and return the exit code, stdout and the JSON report.
fn run_fixture(fixture_name: &str) -> (i32, String, Value) {
    let fixture = fixtures_dir().join(fixture_name);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let output = fixture_command(&fixture, &report_path)
        .output()
        .expect("Failed to run command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");

    let report_content = std::fs::read_to_string(&report_path).expect("Failed to read report");
    let report: Value = serde_json::from_str(&report_content).expect("Failed to parse report JSON");

    (exit_code, stdout, report)
}

fn load_expected_report(fixture_name: &str) -> Value {
    let expected_path = fixtures_dir()
        .join(fixture_name)
        .join("expected.report.json");
    let content = std::fs::read_to_string(&expected_path).expect("Failed to read expected report");
    serde_json::from_str(&content).expect("Failed to parse expected report")
}

fn assert_reports_match(actual: Value, expected: Value, fixture_name: &str) {
    let actual = normalize_nondeterministic(actual);
    let expected = normalize_nondeterministic(expected);

    assert_eq!(
        actual,
        expected,
        "Report mismatch for fixture '{}'.\n\nActual:\n{}\n\nExpected:\n{}",
        fixture_name,
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

fn check_fixture(fixture_name: &str, expected_exit: i32) -> String {
    let (exit_code, stdout, report) = run_fixture(fixture_name);
    assert_eq!(exit_code, expected_exit, "exit code for fixture '{fixture_name}'");
    assert_reports_match(report, load_expected_report(fixture_name), fixture_name);
    stdout
}

// ============================================================================
// Fixture tests
// ============================================================================

#[test]
fn fixture_merge_approved_accepts() {
    let stdout = check_fixture("merge_approved", 0);
    assert_eq!(stdout, "");
}

#[test]
fn fixture_merge_missing_approvals_vetoes() {
    let stdout = check_fixture("merge_missing_approvals", 2);
    assert_eq!(
        stdout,
        "Merge denied: Still require approvals from the following users: Alice Liddell, Carol Danvers\n"
    );
}

#[test]
fn fixture_merge_closed_vetoes() {
    let stdout = check_fixture("merge_closed", 2);
    assert_eq!(stdout, "Request closed: This pull request is already closed\n");
}

#[test]
fn fixture_push_protected_rejects() {
    check_fixture("push_protected", 2);
}

#[test]
fn fixture_push_unprotected_accepts() {
    check_fixture("push_unprotected", 0);
}

#[test]
fn fixture_validate_clean_accepts() {
    check_fixture("validate_clean", 0);
}

#[test]
fn fixture_validate_errors_vetoes() {
    let stdout = check_fixture("validate_errors", 2);
    assert!(stdout.starts_with("approvers1: Error: User 'mallory' unknown\n"));
    assert_eq!(stdout.lines().count(), 8);
}

#[test]
fn fixture_unknown_approver_fails_closed() {
    let (exit_code, _, report) = run_fixture("merge_unknown_approver");

    assert_eq!(exit_code, 1, "lookup failures must not pass");
    assert_eq!(report["gate"], "merge");
    assert_eq!(report["verdict"], "veto");
    assert_eq!(report["vetoes"][0]["code"], "runtime_error");
    let message = report["vetoes"][0]["message"].as_str().expect("message");
    assert!(message.contains("rule 1: approver 'zed' is not a known user"));
}

// ============================================================================
// CLI behavior tests
// ============================================================================

#[test]
fn merge_check_writes_markdown_and_nested_report_dirs() {
    let fixture = fixtures_dir().join("merge_missing_approvals");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("out").join("report.json");
    let md_path = temp_dir.path().join("out").join("comment.md");

    let mut cmd = fixture_command(&fixture, &report_path);
    cmd.arg("--markdown-out").arg(&md_path);
    cmd.assert().code(2);

    assert!(report_path.exists());
    let md = std::fs::read_to_string(&md_path).expect("read markdown");
    assert!(md.contains("Verdict: **VETO**"));
    assert!(md.contains("- Rule 1 `missing_approvals`"));
}

#[test]
fn veto_policy_flag_overrides_settings() {
    let fixture = fixtures_dir().join("merge_closed");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let mut cmd = branchgate_cmd();
    cmd.arg("--veto-policy").arg("first");
    cmd.arg("--settings")
        .arg(fixture.join("settings.toml"))
        .arg("--directory")
        .arg(fixtures_dir().join("directory.json"))
        .arg("merge-check")
        .arg("--pull-request")
        .arg(fixture.join("pull_request.json"))
        .arg("--report-out")
        .arg(&report_path);
    cmd.assert().code(2);

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["data"]["veto_policy"], "first");
}

#[test]
fn missing_settings_file_means_no_rules() {
    let fixture = fixtures_dir().join("merge_closed");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    branchgate_cmd()
        .arg("--settings")
        .arg(temp_dir.path().join("absent.toml"))
        .arg("--directory")
        .arg(fixtures_dir().join("directory.json"))
        .arg("merge-check")
        .arg("--pull-request")
        .arg(fixture.join("pull_request.json"))
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_directory_is_a_runtime_error() {
    let fixture = fixtures_dir().join("merge_approved");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    branchgate_cmd()
        .arg("--settings")
        .arg(fixture.join("settings.toml"))
        .arg("--directory")
        .arg(temp_dir.path().join("nope.json"))
        .arg("merge-check")
        .arg("--pull-request")
        .arg(fixture.join("pull_request.json"))
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("read directory"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["vetoes"][0]["code"], "runtime_error");
    assert_eq!(report["vetoes"][0]["data"]["gate_id"], "gate.merge");
}

#[test]
fn invalid_repository_argument_is_rejected() {
    branchgate_cmd()
        .args(["validate", "--repository", "no-slash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected PROJECT/slug"));
}

#[test]
fn md_renders_existing_report() {
    let fixture = fixtures_dir().join("push_protected");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    fixture_command(&fixture, &report_path).assert().code(2);

    branchgate_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("- Gate: `push`"))
        .stdout(predicate::str::contains("protected_branch_push"));
}

#[test]
fn explain_known_code() {
    branchgate_cmd()
        .args(["explain", "missing_approvals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"));
}

#[test]
fn explain_unknown_code_fails() {
    branchgate_cmd()
        .args(["explain", "nonsense"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown gate id or code: nonsense"));
}
