//! YAML check plans executed by `chk run`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use chk_core::{ChkError, ErrorInfo};
use chk_harness::Harness;
use serde::Deserialize;
use tracing::debug;

/// A suite name and an ordered list of checks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    /// Suite header applied before the first check.
    #[serde(default)]
    pub suite: Option<String>,
    /// Checks in execution order.
    #[serde(default)]
    pub checks: Vec<PlanCheck>,
}

/// One plan entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PlanCheck {
    Equals {
        description: String,
        expected: String,
        actual: String,
    },
    Contains {
        description: String,
        haystack: String,
        needle: String,
    },
    FileContains {
        description: String,
        file: PathBuf,
        pattern: String,
    },
    FileNotContains {
        description: String,
        file: PathBuf,
        pattern: String,
    },
    FileExists {
        description: String,
        file: PathBuf,
    },
    ExitCodeEquals {
        description: String,
        command: String,
        expected: i32,
    },
    CommandSucceeded {
        description: String,
        command: String,
    },
}

/// Reads and parses a plan file.
pub fn load_plan(path: &Path) -> Result<Plan, ChkError> {
    let bytes = fs::read(path).map_err(|err| ChkError::io("plan-read", err, path))?;
    serde_yaml::from_slice(&bytes).map_err(|err| {
        ChkError::Usage(
            ErrorInfo::new("plan-parse", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

#[cfg(unix)]
fn signal_status(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|signal| 128 + signal).unwrap_or(1)
}

#[cfg(not(unix))]
fn signal_status(_status: &ExitStatus) -> i32 {
    1
}

/// Runs `command` through `sh -c` and returns its exit status. Signals map
/// to `128 + signal` the way shells report them.
fn shell_status(command: &str) -> Result<i32, ChkError> {
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .status()
        .map_err(|err| ChkError::io("command-spawn", err, "sh"))?;
    let code = status.code().unwrap_or_else(|| signal_status(&status));
    debug!(command, code, "command finished");
    Ok(code)
}

/// Relative file paths resolve against `base`, the plan's directory.
pub fn execute(plan: &Plan, base: &Path, harness: &mut Harness) -> Result<(), ChkError> {
    if let Some(suite) = &plan.suite {
        harness.suite(suite)?;
    }
    for check in &plan.checks {
        match check {
            PlanCheck::Equals {
                description,
                expected,
                actual,
            } => {
                harness.equals(expected, actual, description)?;
            }
            PlanCheck::Contains {
                description,
                haystack,
                needle,
            } => {
                harness.contains(haystack, needle, description)?;
            }
            PlanCheck::FileContains {
                description,
                file,
                pattern,
            } => {
                harness.file_contains(base.join(file), pattern, description)?;
            }
            PlanCheck::FileNotContains {
                description,
                file,
                pattern,
            } => {
                harness.file_not_contains(base.join(file), pattern, description)?;
            }
            PlanCheck::FileExists { description, file } => {
                harness.file_exists(base.join(file), description)?;
            }
            PlanCheck::ExitCodeEquals {
                description,
                command,
                expected,
            } => {
                let actual = shell_status(command)?;
                harness.exit_code_equals(*expected, actual, description)?;
            }
            PlanCheck::CommandSucceeded {
                description,
                command,
            } => {
                let status = shell_status(command)?;
                harness.command_succeeded(status, description)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_parses_every_kind() {
        let yaml = r#"
suite: Release
checks:
  - kind: equals
    description: versions agree
    expected: "1.2"
    actual: "1.2"
  - kind: contains
    description: greeting
    haystack: hello world
    needle: world
  - kind: file-contains
    description: port configured
    file: app.conf
    pattern: "port = 80"
  - kind: file-not-contains
    description: no debug
    file: app.conf
    pattern: debug
  - kind: file-exists
    description: config present
    file: app.conf
  - kind: exit-code-equals
    description: false fails
    command: "false"
    expected: 1
  - kind: command-succeeded
    description: true works
    command: "true"
"#;
        let plan: Plan = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plan.suite.as_deref(), Some("Release"));
        assert_eq!(plan.checks.len(), 7);
        assert_eq!(
            plan.checks[5],
            PlanCheck::ExitCodeEquals {
                description: "false fails".to_string(),
                command: "false".to_string(),
                expected: 1,
            }
        );
    }

    #[test]
    fn missing_fields_are_rejected() {
        let yaml = "checks:\n  - kind: equals\n    description: incomplete\n    expected: a\n";
        assert!(serde_yaml::from_str::<Plan>(yaml).is_err());
    }
}
