use chk_core::{CheckStatus, RunSummary};
use serde::{Deserialize, Serialize};

/// Pass/fail totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounts {
    /// Number of checks.
    pub total: usize,
    /// Number of passed checks.
    pub passed: usize,
    /// Number of failed checks.
    pub failed: usize,
}

/// One entry of the `tests` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestEntry {
    /// Check description.
    pub name: String,
    /// `passed` or `failed`.
    pub status: CheckStatus,
    /// Check duration in milliseconds.
    pub duration: u64,
    /// Failure message; omitted when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Document emitted as JSON and YAML. Field order is part of the format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    /// Suite label.
    pub test_suite: String,
    /// ISO-8601 start timestamp.
    pub timestamp: String,
    /// Run duration in milliseconds.
    pub duration: u64,
    /// Totals.
    pub summary: SummaryCounts,
    /// Outcomes in evaluation order.
    pub tests: Vec<TestEntry>,
}

impl ReportDocument {
    /// Builds the document from a finalized run.
    pub fn from_summary(summary: &RunSummary) -> Self {
        Self {
            test_suite: summary.suite_name.clone(),
            timestamp: summary.timestamp.clone(),
            duration: summary.duration_ms,
            summary: SummaryCounts {
                total: summary.total,
                passed: summary.passed,
                failed: summary.failed,
            },
            tests: summary
                .outcomes
                .iter()
                .map(|outcome| TestEntry {
                    name: outcome.description.clone(),
                    status: outcome.status,
                    duration: outcome.duration_ms,
                    message: outcome.message.clone(),
                })
                .collect(),
        }
    }
}
