//! The check predicates. Each one times itself, narrates, records exactly one
//! outcome and hands the verdict back so scripts can branch on it.

use std::path::Path;

use chk_core::{CheckStatus, ChkError, ErrorInfo};
use tracing::warn;

use crate::capability::Toolset;
use crate::harness::Harness;

/// `None` for a pass, otherwise the failure message.
type Verdict = Option<String>;

fn require(value: &str, argument: &str, predicate: &str) -> Result<(), ChkError> {
    if value.is_empty() {
        return Err(ChkError::Usage(
            ErrorInfo::new(
                "missing-argument",
                format!("`{predicate}` requires a non-empty {argument}"),
            )
            .with_context("predicate", predicate)
            .with_context("argument", argument),
        ));
    }
    Ok(())
}

fn search(tools: &dyn Toolset, file: &Path, pattern: &str) -> bool {
    match tools.contains_literal(file, pattern) {
        Ok(found) => found,
        Err(err) => {
            warn!(file = %file.display(), %err, "search failed, treating as no match");
            false
        }
    }
}

impl Harness {
    fn evaluate(
        &mut self,
        description: &str,
        condition: impl FnOnce(&dyn Toolset) -> Verdict,
    ) -> Result<bool, ChkError> {
        require(description, "description", "check")?;
        self.mark_started();
        let start = self.clock.now_ms();
        let verdict = condition(self.tools.as_ref());
        let elapsed = self.clock.now_ms().saturating_sub(start);
        let (status, message) = match verdict {
            None => {
                self.narrator.pass(description);
                (CheckStatus::Passed, String::new())
            }
            Some(message) => {
                self.narrator.fail(description, &message);
                (CheckStatus::Failed, message)
            }
        };
        self.run.record(status, description, &message, elapsed)?;
        Ok(status.is_passed())
    }

    /// Exact text equality.
    pub fn equals(
        &mut self,
        expected: &str,
        actual: &str,
        description: &str,
    ) -> Result<bool, ChkError> {
        self.evaluate(description, |_| {
            (expected != actual).then(|| format!("Expected: '{expected}', Got: '{actual}'"))
        })
    }

    /// Literal substring containment. An empty needle always matches.
    pub fn contains(
        &mut self,
        haystack: &str,
        needle: &str,
        description: &str,
    ) -> Result<bool, ChkError> {
        self.evaluate(description, |_| {
            (!haystack.contains(needle))
                .then(|| format!("Expected to find: '{needle}' in '{haystack}'"))
        })
    }

    /// Passes when `pattern` occurs literally in `file`. An unreadable file
    /// counts as no match.
    pub fn file_contains(
        &mut self,
        file: impl AsRef<Path>,
        pattern: &str,
        description: &str,
    ) -> Result<bool, ChkError> {
        let file = file.as_ref();
        require(&file.to_string_lossy(), "file", "file_contains")?;
        self.evaluate(description, |tools| {
            (!search(tools, file, pattern))
                .then(|| format!("Pattern '{pattern}' not found in file"))
        })
    }

    /// Passes when `pattern` does not occur in `file`. An unreadable file
    /// counts as no match, so it passes.
    pub fn file_not_contains(
        &mut self,
        file: impl AsRef<Path>,
        pattern: &str,
        description: &str,
    ) -> Result<bool, ChkError> {
        let file = file.as_ref();
        require(&file.to_string_lossy(), "file", "file_not_contains")?;
        self.evaluate(description, |tools| {
            search(tools, file, pattern)
                .then(|| format!("Unexpected pattern '{pattern}' found in file"))
        })
    }

    /// Passes when `file` is an existing regular file.
    pub fn file_exists(
        &mut self,
        file: impl AsRef<Path>,
        description: &str,
    ) -> Result<bool, ChkError> {
        let file = file.as_ref();
        require(&file.to_string_lossy(), "file", "file_exists")?;
        self.evaluate(description, |_| {
            (!file.is_file()).then(|| format!("File does not exist: {}", file.display()))
        })
    }

    /// Integer equality of exit codes.
    pub fn exit_code_equals(
        &mut self,
        expected: i32,
        actual: i32,
        description: &str,
    ) -> Result<bool, ChkError> {
        self.evaluate(description, |_| {
            (expected != actual).then(|| format!("Expected exit code: {expected}, Got: {actual}"))
        })
    }

    /// Passes when the caller supplied status is zero.
    pub fn command_succeeded(&mut self, status: i32, description: &str) -> Result<bool, ChkError> {
        self.evaluate(description, |_| {
            (status != 0).then(|| "Command returned non-zero exit code".to_string())
        })
    }
}
