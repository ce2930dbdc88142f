//! Structured error types shared across chk crates.
//!
//! Every variant is a framework or environment failure. A failed check is
//! never an error: it is recorded as an outcome and surfaces through the
//! report and the exit status instead.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process status used when a run aborts on a framework error.
///
/// Distinct from `1`, which means "at least one check failed".
pub const FATAL_EXIT_CODE: u8 = 2;

/// Structured payload attached to every [`ChkError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, flag values, tool names).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for chk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ChkError {
    /// The library was called incorrectly (missing description, bad plan).
    #[error("usage error: {0}")]
    Usage(ErrorInfo),
    /// Report configuration could not be honoured.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// A required host capability is unavailable or misbehaved.
    #[error("capability error: {0}")]
    Capability(ErrorInfo),
    /// The host platform is not supported by the selected toolset.
    #[error("platform error: {0}")]
    Platform(ErrorInfo),
    /// Filesystem or stream failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization failures while rendering or loading documents.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

/// Human-facing form: the message, then the context pairs in parentheses and
/// the hint after a semicolon. The code is left to callers that want it.
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        let mut pairs = self.context.iter();
        if let Some((key, value)) = pairs.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in pairs {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; hint: {hint}")?;
        }
        Ok(())
    }
}

impl ChkError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ChkError::Usage(info)
            | ChkError::Config(info)
            | ChkError::Capability(info)
            | ChkError::Platform(info)
            | ChkError::Io(info)
            | ChkError::Serde(info) => info,
        }
    }

    /// Wraps an I/O error, attaching the path it concerned.
    pub fn io(code: &str, err: std::io::Error, path: impl AsRef<std::path::Path>) -> Self {
        ChkError::Io(
            ErrorInfo::new(code, err.to_string())
                .with_context("path", path.as_ref().display().to_string()),
        )
    }
}
