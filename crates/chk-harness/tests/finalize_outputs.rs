mod common;

use std::fs;
use std::path::PathBuf;

use chk_core::{script_base_name, ChkError, ReportConfiguration};
use chk_harness::{Harness, NativeTools, StreamEdit, TextSearch};
use serde_json::Value;
use tempfile::tempdir;

use common::{config, harness};

#[test]
fn two_of_three_passing_exits_one() -> Result<(), ChkError> {
    let dir = tempdir().unwrap();
    let (mut h, clock, _) = harness(config(&["--format=json", "--output=r.json"], dir.path()))?;
    h.suite("Equals")?;
    h.equals("a", "a", "first")?;
    h.equals("a", "b", "second")?;
    h.equals("c", "c", "third")?;
    clock.advance(1_234);
    let outcome = h.finalize()?;
    assert_eq!(outcome.exit_code(), 1);

    let path = outcome.destination.clone().unwrap();
    assert_eq!(path, dir.path().join("r.json"));
    let value: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["testSuite"], "Equals");
    assert_eq!(value["duration"], 1_234);
    assert_eq!(value["summary"]["total"], 3);
    assert_eq!(value["summary"]["passed"], 2);
    assert_eq!(value["summary"]["failed"], 1);
    let names: Vec<_> = value["tests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["first", "second", "third"]);
    Ok(())
}

#[test]
fn zero_checks_exit_zero_without_banner() -> Result<(), ChkError> {
    let dir = tempdir().unwrap();
    let (h, _, out) = harness(config(&[], dir.path()))?;
    let outcome = h.finalize()?;
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.destination, None);
    assert_eq!(
        (outcome.summary.total, outcome.summary.passed, outcome.summary.failed),
        (0, 0, 0)
    );
    let console = out.contents();
    assert!(console.contains("Total:  0"));
    assert!(!console.contains("All tests passed!"));
    Ok(())
}

#[test]
fn passing_run_prints_banner_on_stdout() -> Result<(), ChkError> {
    let dir = tempdir().unwrap();
    let (mut h, _, out) = harness(config(&["--quiet"], dir.path()))?;
    h.contains("abc", "b", "has b")?;
    let outcome = h.finalize()?;
    assert_eq!(outcome.exit_code(), 0);
    let console = out.contents();
    assert!(!console.contains("✓"));
    assert!(console.contains("All tests passed!"));
    Ok(())
}

#[test]
fn structured_format_defaults_to_script_named_file() -> Result<(), ChkError> {
    let dir = tempdir().unwrap();
    // The default destination is relative to the working directory. Every
    // other test in this file uses absolute paths.
    std::env::set_current_dir(dir.path()).unwrap();
    let config = ReportConfiguration::resolve(["--format", "junit"], "nightly", |_| None);
    let (mut h, _, out) = harness(config)?;
    h.exit_code_equals(0, 0, "exit ok")?;
    let outcome = h.finalize()?;
    let expected = PathBuf::from("test-results-nightly.xml");
    assert_eq!(outcome.destination.as_ref(), Some(&expected));
    let body = fs::read_to_string(dir.path().join(&expected)).unwrap();
    assert!(body.contains("<testsuite name=\"Test Suite\" tests=\"1\" failures=\"0\""));
    assert!(out.contents().contains("Results written to test-results-nightly.xml"));
    Ok(())
}

#[test]
fn console_format_with_output_writes_text_file() -> Result<(), ChkError> {
    let dir = tempdir().unwrap();
    let (mut h, _, out) = harness(config(&["--output", "summary.txt", "-q"], dir.path()))?;
    h.equals("1", "1", "one")?;
    let outcome = h.finalize()?;
    let body = fs::read_to_string(outcome.destination.unwrap()).unwrap();
    assert!(body.contains("Passed: 1"));
    assert!(!body.contains('\x1b'));
    assert_eq!(out.contents(), "");
    Ok(())
}

#[test]
fn unrecognized_format_fails_at_finalize() -> Result<(), ChkError> {
    let dir = tempdir().unwrap();
    let (mut h, _, _) = harness(config(&["--format=toml", "--output=r.toml"], dir.path()))?;
    h.equals("a", "a", "still recorded")?;
    let err = h.finalize().unwrap_err();
    assert!(matches!(err, ChkError::Config(_)));
    assert!(!dir.path().join("r.toml").exists());
    Ok(())
}

#[test]
fn csv_and_yaml_share_outcome_order() -> Result<(), ChkError> {
    for (flag, file) in [("--format=csv", "r.csv"), ("--format=yaml", "r.yaml")] {
        let dir = tempdir().unwrap();
        let output = format!("--output={file}");
        let (mut h, _, _) = harness(config(&[flag, output.as_str()], dir.path()))?;
        h.equals("x", "y", "alpha")?;
        h.equals("x", "x", "beta")?;
        let outcome = h.finalize()?;
        let body = fs::read_to_string(outcome.destination.unwrap()).unwrap();
        let alpha = body.find("alpha").unwrap();
        let beta = body.find("beta").unwrap();
        assert!(alpha < beta, "{file} lost outcome order");
    }
    Ok(())
}

#[test]
fn stream_edit_goes_through_toolset() -> Result<(), ChkError> {
    let dir = tempdir().unwrap();
    let file = dir.path().join("version.txt");
    fs::write(&file, "version=1.0\nother=1.0\n").unwrap();
    let (mut h, _, _) = harness(config(&[], dir.path()))?;
    h.substitute_in_file(&file, "1.0", "2.0")?;
    assert!(h.file_contains(&file, "version=2.0", "bumped")?);
    assert_eq!(fs::read_to_string(&file).unwrap(), "version=2.0\nother=2.0\n");
    assert!(matches!(
        NativeTools.substitute(&file, "", "x"),
        Err(ChkError::Usage(_))
    ));
    assert!(NativeTools.contains_literal(&file, "other").unwrap());
    Ok(())
}

#[test]
fn default_initialize_uses_native_tools() -> Result<(), ChkError> {
    let harness = Harness::initialize(ReportConfiguration::default())?;
    assert_eq!(harness.run().total(), 0);
    assert!(!harness.config().quiet);
    Ok(())
}

#[test]
fn process_arguments_name_the_default_report() -> Result<(), ChkError> {
    let harness = Harness::from_env_args()?;
    let program = std::env::args().next().unwrap();
    assert_eq!(harness.config().script_name, script_base_name(&program));
    assert!(!harness.config().script_name.is_empty());
    assert_eq!(harness.run().total(), 0);
    Ok(())
}
