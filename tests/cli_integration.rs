//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get the binary to test.
fn devflow() -> Command {
    let mut cmd = Command::cargo_bin("devflow").unwrap();
    cmd.env_remove("DEVFLOW_TEMPLATE_DIR");
    cmd
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    devflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("development workflow"));
}

#[test]
fn test_short_help_flag() {
    devflow().arg("-h").assert().success().stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    devflow()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    devflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wizard"))
        .stdout(predicate::str::contains("review"))
        .stdout(predicate::str::contains("cleanup"))
        .stdout(predicate::str::contains("build-check"));
}

// ============================================================================
// Setup Tests
// ============================================================================

#[test]
fn test_list_template_files() {
    let temp = assert_fs::TempDir::new().unwrap();

    devflow()
        .arg(temp.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Template files ("))
        .stdout(predicate::str::contains(".devflow/state.json"));

    temp.child(".devflow").assert(predicate::path::missing());
}

#[test]
fn test_setup_into_empty_dir() {
    let temp = assert_fs::TempDir::new().unwrap();

    devflow()
        .arg("setup")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("copied"))
        .stdout(predicate::str::contains("Next steps"));

    temp.child(".devflow/state.json").assert(predicate::path::is_file());
    temp.child(".devflow/preset.json").assert(predicate::path::is_file());
    temp.child(".devflow/steps/.keep").assert(predicate::path::is_file());
}

#[test]
fn test_setup_twice_with_yes_skips_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    devflow().arg(temp.path()).assert().success();

    temp.child(".devflow/state.json").write_str("{\"edited\": true}").unwrap();

    devflow()
        .arg(temp.path())
        .arg("-y")
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));

    temp.child(".devflow/state.json").assert("{\"edited\": true}");
}

#[test]
fn test_setup_force_overwrites() {
    let temp = assert_fs::TempDir::new().unwrap();
    devflow().arg(temp.path()).assert().success();
    temp.child(".devflow/state.json").write_str("{}").unwrap();

    devflow()
        .args(["init", "--force"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("overwritten"));

    temp.child(".devflow/state.json").assert(predicate::str::contains("suggestedNext"));
}

#[test]
fn test_setup_with_missing_template_fails() {
    let temp = assert_fs::TempDir::new().unwrap();

    devflow()
        .arg(temp.path())
        .arg("--template-dir")
        .arg(temp.path().join("no-such-template"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template directory not found"));
}

// ============================================================================
// Wizard Tests
// ============================================================================

#[test]
fn test_wizard_writes_preset() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("preset.json");

    devflow()
        .args(["wizard", "--output"])
        .arg(output.path())
        .args(["fix", "the", "login", "bug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bugfix"));

    output.assert(predicate::str::contains("\"bugfix\""));
    output.assert(predicate::str::contains("\"matchedKeywords\""));
}

#[test]
fn test_wizard_without_intent_aborts() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("preset.json");

    devflow()
        .args(["wizard", "--output"])
        .arg(output.path())
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No intent provided"));

    output.assert(predicate::path::missing());
}

// ============================================================================
// Review Tests
// ============================================================================

#[test]
fn test_review_writes_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    devflow().arg(temp.path()).assert().success();
    temp.child(".devflow/steps/step-01.requirements.json")
        .write_str(r#"{"status": "approved", "summary": "Login flow"}"#)
        .unwrap();
    let report = temp.child("review.md");

    devflow()
        .arg("review")
        .arg("--cwd")
        .arg(temp.path())
        .arg("--output")
        .arg(report.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DevFlow Review"))
        .stdout(predicate::str::contains("step-02.api-contract"));

    report.assert(predicate::str::contains("## Missing step artifacts"));
}

#[test]
fn test_review_json_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    devflow().arg(temp.path()).assert().success();

    devflow()
        .args(["review", "--json", "--cwd"])
        .arg(temp.path())
        .arg("--output")
        .arg(temp.path().join("review.md"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"missingSteps\""));
}

// ============================================================================
// Cleanup Tests
// ============================================================================

#[test]
fn test_cleanup_uninitialized_fails() {
    let temp = assert_fs::TempDir::new().unwrap();

    devflow()
        .args(["cleanup", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cleanup_dry_run_changes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    devflow().arg(temp.path()).assert().success();
    let step = temp.child(".devflow/steps/step-01.requirements.json");
    step.write_str("{}").unwrap();

    devflow()
        .args(["cleanup", "--dry-run", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"));

    step.assert(predicate::path::is_file());
}

#[test]
fn test_cleanup_purge_removes_steps() {
    let temp = assert_fs::TempDir::new().unwrap();
    devflow().arg(temp.path()).assert().success();
    let step = temp.child(".devflow/steps/step-01.requirements.json");
    step.write_str("{}").unwrap();

    devflow().args(["cleanup", "--purge", "--cwd"]).arg(temp.path()).assert().success();

    step.assert(predicate::path::missing());
    temp.child(".devflow/steps/.keep").assert(predicate::path::is_file());
}

// ============================================================================
// Build Check Tests
// ============================================================================

#[test]
fn test_build_check_in_empty_dir_passes() {
    let temp = assert_fs::TempDir::new().unwrap();

    devflow()
        .args(["build-check", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"ok\""));
}

#[test]
fn test_build_check_writes_output_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = temp.child("reports/build.json");

    devflow()
        .args(["build-check", "--cwd"])
        .arg(temp.path())
        .arg("--output")
        .arg(output.path())
        .assert()
        .success();

    output.assert(predicate::str::contains("\"tasks\""));
}

// ============================================================================
// Completions & Config Tests
// ============================================================================

#[test]
fn test_completions_bash() {
    devflow()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("devflow"));
}

#[test]
fn test_completions_invalid_shell() {
    devflow().args(["completions", "invalid"]).assert().failure();
}

#[test]
fn test_config_shows_defaults() {
    let temp = assert_fs::TempDir::new().unwrap();

    devflow()
        .arg("config")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("commit_limit"));
}
