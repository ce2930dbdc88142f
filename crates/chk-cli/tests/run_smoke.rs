use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

const PLAN: &str = r#"
suite: Smoke
checks:
  - kind: file-exists
    description: config present
    file: app.conf
  - kind: file-contains
    description: port configured
    file: app.conf
    pattern: "port = 80"
  - kind: equals
    description: version drift
    expected: "1.2"
    actual: "1.3"
  - kind: command-succeeded
    description: true succeeds
    command: "true"
  - kind: exit-code-equals
    description: exit 3 observed
    command: "exit 3"
    expected: 3
"#;

fn chk(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chk"))
        .args(args)
        .current_dir(dir)
        .env_remove("CHK_OUTPUT_FORMAT")
        .env_remove("CHK_QUIET")
        .output()
        .expect("run chk")
}

fn write_plan(dir: &Path, plan: &str) {
    fs::write(dir.join("app.conf"), "port = 80\n").unwrap();
    fs::write(dir.join("smoke.yaml"), plan).unwrap();
}

#[test]
fn json_report_lands_in_default_file() {
    let dir = tempdir().unwrap();
    write_plan(dir.path(), PLAN);
    let output = chk(dir.path(), &["run", "smoke.yaml", "--format=json", "-q"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "quiet run should not narrate");

    let body = fs::read_to_string(dir.path().join("test-results-smoke.json")).unwrap();
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["testSuite"], "Smoke");
    assert_eq!(value["summary"]["total"], 5);
    assert_eq!(value["summary"]["passed"], 4);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["tests"][2]["message"], "Expected: '1.2', Got: '1.3'");
}

#[test]
fn console_run_narrates_and_passes() {
    let dir = tempdir().unwrap();
    let plan = PLAN.replace("actual: \"1.3\"", "actual: \"1.2\"");
    write_plan(dir.path(), &plan);
    let output = chk(dir.path(), &["run", "smoke.yaml"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Running test suite: Smoke"));
    assert!(stdout.contains("✓ version drift"));
    assert!(stdout.contains("All tests passed!"));
}

#[test]
fn explicit_output_and_junit() {
    let dir = tempdir().unwrap();
    write_plan(dir.path(), PLAN);
    let output = chk(
        dir.path(),
        &["run", "smoke.yaml", "--format", "junit", "--output", "out/report.xml"],
    );
    assert_eq!(output.status.code(), Some(1));
    let body = fs::read_to_string(dir.path().join("out/report.xml")).unwrap();
    assert!(body.contains("tests=\"5\" failures=\"1\""));
    assert!(!dir.path().join("test-results-smoke.xml").exists());
}

#[test]
fn framework_errors_use_distinct_status() {
    let dir = tempdir().unwrap();
    write_plan(dir.path(), "checks:\n  - kind: equals\n    description: broken\n");
    let output = chk(dir.path(), &["run", "smoke.yaml", "--format=json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("chk: [plan-parse] usage error:"));
    assert!(!dir.path().join("test-results-smoke.json").exists());

    write_plan(dir.path(), PLAN);
    let output = chk(dir.path(), &["run", "smoke.yaml", "--format=toml"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("chk: [unknown-format] config error:"));
}

#[test]
fn environment_supplies_defaults() {
    let dir = tempdir().unwrap();
    write_plan(dir.path(), PLAN);
    let output = Command::new(env!("CARGO_BIN_EXE_chk"))
        .args(["run", "smoke.yaml"])
        .current_dir(dir.path())
        .env("CHK_OUTPUT_FORMAT", "csv")
        .env("CHK_QUIET", "1")
        .output()
        .expect("run chk");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let body = fs::read_to_string(dir.path().join("test-results-smoke.csv")).unwrap();
    assert!(body.starts_with("Test Name,Status,Duration (ms),Message\n"));
    assert_eq!(body.lines().count(), 6);
}

#[test]
fn doctor_reports_native_toolset() {
    let dir = tempdir().unwrap();
    let output = chk(dir.path(), &["doctor", "--quiet"]);
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    let toolsets = value["toolsets"].as_array().unwrap();
    assert_eq!(toolsets[0]["name"], "native");
    assert_eq!(toolsets[0]["ok"], true);
}
