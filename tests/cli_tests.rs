//! CLI integration tests for the hrms binary
//!
//! These tests run the compiled binary. None of them needs a live backend:
//! they cover argument handling, local validation, and transport failures.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command instance for the hrms binary
#[allow(deprecated)]
fn hrms_cmd() -> Command {
    let mut cmd = Command::cargo_bin("hrms").expect("Failed to find hrms binary");
    cmd.env_remove("HRMS_API_URL").env("NO_COLOR", "1");
    cmd
}

/// An address nothing listens on.
const DEAD_API_URL: &str = "http://127.0.0.1:1";

// ============================================================================
// --help / --version
// ============================================================================

#[test]
fn test_help_lists_commands() {
    hrms_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Command-line client for the HRMS Lite backend",
        ))
        .stdout(predicate::str::contains("employees"))
        .stdout(predicate::str::contains("attendance"));
}

#[test]
fn test_version_flag() {
    hrms_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_attendance_help_lists_subcommands() {
    hrms_cmd()
        .args(["attendance", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mark"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_missing_command_fails() {
    hrms_cmd().assert().failure();
}

#[test]
fn test_invalid_command_fails() {
    hrms_cmd()
        .arg("payroll")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    hrms_cmd()
        .args(["-q", "-v", "employees", "list"])
        .assert()
        .failure();
}

// ============================================================================
// Local validation (exit code 65, nothing sent)
// ============================================================================

#[test]
fn test_add_employee_with_bad_email_is_rejected_locally() {
    hrms_cmd()
        .args([
            "--api-url",
            DEAD_API_URL,
            "employees",
            "add",
            "--employee-id",
            "EMP001",
            "--full-name",
            "Ada Lovelace",
            "--email",
            "bad",
            "--department",
            "Engineering",
        ])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("email: Invalid email format"))
        // Validation stops before any request is made.
        .stderr(predicate::str::contains("Unable to connect").not());
}

#[test]
fn test_add_employee_reports_every_missing_field() {
    hrms_cmd()
        .args(["--api-url", DEAD_API_URL, "employees", "add"])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Employee ID is required"))
        .stderr(predicate::str::contains("Full Name is required"))
        .stderr(predicate::str::contains("Email is required"))
        .stderr(predicate::str::contains("Department is required"));
}

#[test]
fn test_mark_attendance_rejects_unknown_status() {
    hrms_cmd()
        .args([
            "--api-url",
            DEAD_API_URL,
            "attendance",
            "mark",
            "--employee-id",
            "EMP001",
            "--date",
            "2025-01-05",
            "--status",
            "Late",
        ])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Status must be Present or Absent"));
}

#[test]
fn test_mark_attendance_rejects_future_date() {
    hrms_cmd()
        .args([
            "--api-url",
            DEAD_API_URL,
            "attendance",
            "mark",
            "--employee-id",
            "EMP001",
            "--date",
            "2999-01-01",
        ])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Date cannot be in the future"));
}

// ============================================================================
// Transport failures (exit code 1)
// ============================================================================

#[test]
fn test_unreachable_backend_reports_transport_error() {
    hrms_cmd()
        .args(["--api-url", DEAD_API_URL, "employees", "list"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Unable to connect to the server")
                .or(predicate::str::contains("Network error")),
        );
}

#[test]
fn test_api_url_from_environment() {
    let mut cmd = hrms_cmd();
    cmd.env("HRMS_API_URL", DEAD_API_URL)
        .args(["attendance", "stats", "EMP001"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Unable to connect to the server")
                .or(predicate::str::contains("Network error")),
        );
}

#[test]
fn test_invalid_api_url_fails() {
    hrms_cmd()
        .args(["--api-url", "not a url", "employees", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API base URL"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    hrms_cmd()
        .arg("--config")
        .arg(&missing)
        .args(["employees", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn test_config_file_sets_base_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hrms.toml");
    std::fs::write(&path, format!("base_url = \"{}\"\ntimeout_secs = 2\n", DEAD_API_URL)).unwrap();

    hrms_cmd()
        .arg("--config")
        .arg(&path)
        .args(["employees", "list"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Unable to connect to the server")
                .or(predicate::str::contains("Network error")),
        );
}
