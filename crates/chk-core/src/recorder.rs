use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ChkError, ErrorInfo};
use crate::outcome::{CheckOutcome, CheckStatus};

/// Suite label used until a suite header names the run.
pub const DEFAULT_SUITE_NAME: &str = "Test Suite";

fn usage_error(code: &str, message: impl Into<String>) -> ChkError {
    ChkError::Usage(ErrorInfo::new(code, message.into()))
}

/// In-memory state of one test-suite execution.
///
/// Outcomes are only ever appended through [`Run::record`], which keeps
/// `total == passed + failed == outcomes.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    suite_name: String,
    named: bool,
    started_at_ms: Option<u64>,
    timestamp: Option<String>,
    passed: usize,
    failed: usize,
    outcomes: Vec<CheckOutcome>,
}

impl Default for Run {
    fn default() -> Self {
        Self {
            suite_name: DEFAULT_SUITE_NAME.to_string(),
            named: false,
            started_at_ms: None,
            timestamp: None,
            passed: 0,
            failed: 0,
            outcomes: Vec::new(),
        }
    }
}

impl Run {
    /// Creates an empty run with the default suite label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a suite header. The first header names the run and fixes its
    /// start time; later headers leave both untouched and return `false`.
    pub fn begin_suite(&mut self, name: &str, now_ms: u64, timestamp: String) -> bool {
        if self.named {
            debug!(suite = name, "ignoring repeated suite header");
            return false;
        }
        self.named = true;
        self.suite_name = name.to_string();
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
            self.timestamp = Some(timestamp);
        }
        true
    }

    /// Fixes the start time if no suite header has done so yet.
    pub fn ensure_started(&mut self, now_ms: u64, timestamp: impl FnOnce() -> String) {
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
            self.timestamp = Some(timestamp());
        }
    }

    /// Appends one outcome and bumps the matching counter.
    ///
    /// An empty description is a caller bug and aborts the run.
    pub fn record(
        &mut self,
        status: CheckStatus,
        description: &str,
        message: &str,
        duration_ms: u64,
    ) -> Result<(), ChkError> {
        if description.is_empty() {
            return Err(usage_error(
                "missing-description",
                "record requires a non-empty check description",
            ));
        }
        match status {
            CheckStatus::Passed => self.passed += 1,
            CheckStatus::Failed => self.failed += 1,
        }
        let message = if status.is_passed() {
            String::new()
        } else {
            message.to_string()
        };
        self.outcomes.push(CheckOutcome {
            status,
            description: description.to_string(),
            message,
            duration_ms,
        });
        debug!(
            status = status.as_str(),
            description,
            duration_ms,
            total = self.outcomes.len(),
            "recorded outcome"
        );
        Ok(())
    }

    /// Current suite label.
    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    /// Start instant, once known.
    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    /// Number of recorded outcomes.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of passed outcomes.
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Number of failed outcomes.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Outcomes in evaluation order.
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// Freezes the run into a summary. `now_ms` is the finalize instant.
    pub fn summarize(&self, now_ms: u64, timestamp: impl FnOnce() -> String) -> RunSummary {
        let started = self.started_at_ms.unwrap_or(now_ms);
        let timestamp = self.timestamp.clone().unwrap_or_else(timestamp);
        RunSummary {
            suite_name: self.suite_name.clone(),
            timestamp,
            duration_ms: now_ms.saturating_sub(started),
            total: self.total(),
            passed: self.passed,
            failed: self.failed,
            outcomes: self.outcomes.clone(),
        }
    }
}

/// Snapshot of a finished run; the single input of every report format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Suite label.
    pub suite_name: String,
    /// ISO-8601 start timestamp.
    pub timestamp: String,
    /// Milliseconds between suite start and finalize.
    pub duration_ms: u64,
    /// Number of recorded checks.
    pub total: usize,
    /// Number of passed checks.
    pub passed: usize,
    /// Number of failed checks.
    pub failed: usize,
    /// Outcomes in evaluation order.
    pub outcomes: Vec<CheckOutcome>,
}

impl RunSummary {
    /// True when no check failed, including the zero-check case.
    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }

    /// True only when something passed and nothing failed.
    pub fn all_passed_banner(&self) -> bool {
        self.passed > 0 && self.failed == 0
    }

    /// Process status for this run: `0` without failures, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }
}
