use serde::{Deserialize, Serialize};

/// Result of a single check. There is no skipped or errored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The condition held.
    Passed,
    /// The condition did not hold.
    Failed,
}

impl CheckStatus {
    /// Maps a boolean verdict onto a status.
    pub fn from_pass(pass: bool) -> Self {
        if pass {
            CheckStatus::Passed
        } else {
            CheckStatus::Failed
        }
    }

    /// Lowercase label used by every structured format.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
        }
    }

    /// Whether this is [`CheckStatus::Passed`].
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckStatus::Passed)
    }
}

/// One evaluated check. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Pass or fail.
    pub status: CheckStatus,
    /// Caller supplied description; neither unique nor validated beyond presence.
    pub description: String,
    /// Failure diagnostic. Always empty for passed checks.
    pub message: String,
    /// Wall-clock milliseconds spent evaluating this check alone.
    pub duration_ms: u64,
}
