//! Host capabilities the assertion engine depends on: literal search within a
//! file and line-oriented stream editing.
//!
//! [`NativeTools`] implements both in-process. [`SystemTools`] drives the
//! host's `grep` and `sed`, adapting to the GNU or BSD flavour of `sed`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use chk_core::{ChkError, ErrorInfo};
use tracing::debug;

/// Case-sensitive, fixed-string search inside a file.
pub trait TextSearch {
    /// Returns whether `pattern` occurs literally in the file at `path`.
    fn contains_literal(&self, path: &Path, pattern: &str) -> Result<bool, ChkError>;
}

/// Line-oriented editing of a file in place.
pub trait StreamEdit {
    /// Replaces every literal occurrence of `from` with `to` on every line.
    fn substitute(&self, path: &Path, from: &str, to: &str) -> Result<(), ChkError>;
}

/// A resolved pair of capabilities.
pub trait Toolset: TextSearch + StreamEdit {
    /// Short label for logs and diagnostics.
    fn name(&self) -> &str;

    /// Confirms the capabilities are usable on this host.
    fn probe(&self) -> Result<(), ChkError>;
}

fn capability_error(code: &str, message: impl Into<String>) -> ChkError {
    ChkError::Capability(ErrorInfo::new(code, message.into()))
}

fn check_edit_operands(from: &str, to: &str) -> Result<(), ChkError> {
    if from.is_empty() {
        return Err(ChkError::Usage(ErrorInfo::new(
            "empty-pattern",
            "substitution requires a non-empty pattern",
        )));
    }
    if from.contains('\n') || to.contains('\n') {
        return Err(ChkError::Usage(ErrorInfo::new(
            "multiline-edit",
            "line-oriented substitution cannot span lines",
        )));
    }
    Ok(())
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// In-process implementation. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTools;

impl TextSearch for NativeTools {
    fn contains_literal(&self, path: &Path, pattern: &str) -> Result<bool, ChkError> {
        let bytes = fs::read(path).map_err(|err| ChkError::io("search-read", err, path))?;
        Ok(contains_bytes(&bytes, pattern.as_bytes()))
    }
}

impl StreamEdit for NativeTools {
    fn substitute(&self, path: &Path, from: &str, to: &str) -> Result<(), ChkError> {
        check_edit_operands(from, to)?;
        let text = fs::read_to_string(path).map_err(|err| ChkError::io("edit-read", err, path))?;
        let edited: String = text
            .split_inclusive('\n')
            .map(|line| line.replace(from, to))
            .collect();
        fs::write(path, edited).map_err(|err| ChkError::io("edit-write", err, path))
    }
}

impl Toolset for NativeTools {
    fn name(&self) -> &str {
        "native"
    }

    fn probe(&self) -> Result<(), ChkError> {
        Ok(())
    }
}

/// In-place flag dialect of the host `sed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SedFlavor {
    /// GNU sed: `-i` takes no separate argument.
    Gnu,
    /// BSD/macOS sed: `-i ''`.
    Bsd,
}

/// Implementation backed by the host's `grep` and `sed` binaries.
#[derive(Debug, Clone)]
pub struct SystemTools {
    grep: PathBuf,
    sed: PathBuf,
    flavor: SedFlavor,
}

/// Looks `name` up on `PATH`.
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn detect_flavor(sed: &Path) -> SedFlavor {
    let output = Command::new(sed)
        .arg("--version")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();
    match output {
        Ok(out) if out.status.success() && String::from_utf8_lossy(&out.stdout).contains("GNU") => {
            SedFlavor::Gnu
        }
        _ => SedFlavor::Bsd,
    }
}

/// Escapes a literal for the pattern side of a basic regular expression.
fn escape_sed_pattern(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '/' | '.' | '*' | '[' | ']' | '^' | '$') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn escape_sed_replacement(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '/' | '&') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

impl SystemTools {
    /// Resolves `grep` and `sed` from `PATH`.
    pub fn detect() -> Result<Self, ChkError> {
        if !cfg!(unix) {
            return Err(ChkError::Platform(
                ErrorInfo::new(
                    "unsupported-platform",
                    "system tools require a unix host",
                )
                .with_context("os", env::consts::OS)
                .with_hint("use the native toolset"),
            ));
        }
        let grep = find_in_path("grep").ok_or_else(|| {
            capability_error("missing-grep", "no `grep` executable found on PATH")
        })?;
        let sed = find_in_path("sed")
            .ok_or_else(|| capability_error("missing-sed", "no `sed` executable found on PATH"))?;
        let flavor = detect_flavor(&sed);
        debug!(grep = %grep.display(), sed = %sed.display(), ?flavor, "resolved system tools");
        Ok(Self { grep, sed, flavor })
    }

    /// Detected `sed` dialect.
    pub fn flavor(&self) -> SedFlavor {
        self.flavor
    }
}

impl TextSearch for SystemTools {
    fn contains_literal(&self, path: &Path, pattern: &str) -> Result<bool, ChkError> {
        if pattern.is_empty() {
            // grep finds nothing in an empty file even for an empty pattern.
            return fs::metadata(path)
                .map(|_| true)
                .map_err(|err| ChkError::io("search-read", err, path));
        }
        if pattern.contains(['\n', '\r']) {
            // grep -F reads each pattern line as a separate alternative.
            debug!(path = %path.display(), "multi-line pattern searched in-process");
            return NativeTools.contains_literal(path, pattern);
        }
        let status = Command::new(&self.grep)
            .args(["-F", "-q", "-e", pattern])
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|err| ChkError::io("grep-spawn", err, &self.grep))?;
        match status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            code => Err(ChkError::Capability(
                ErrorInfo::new("grep-failed", "grep could not search the file")
                    .with_context("path", path.display().to_string())
                    .with_context("status", format!("{code:?}")),
            )),
        }
    }
}

impl StreamEdit for SystemTools {
    fn substitute(&self, path: &Path, from: &str, to: &str) -> Result<(), ChkError> {
        check_edit_operands(from, to)?;
        let script = format!(
            "s/{}/{}/g",
            escape_sed_pattern(from),
            escape_sed_replacement(to)
        );
        let mut command = Command::new(&self.sed);
        match self.flavor {
            SedFlavor::Gnu => command.arg("-i"),
            SedFlavor::Bsd => command.args(["-i", ""]),
        };
        let status = command
            .arg("-e")
            .arg(&script)
            .arg(path)
            .stdin(Stdio::null())
            .status()
            .map_err(|err| ChkError::io("sed-spawn", err, &self.sed))?;
        if status.success() {
            Ok(())
        } else {
            Err(ChkError::Capability(
                ErrorInfo::new("sed-failed", "sed could not edit the file")
                    .with_context("path", path.display().to_string())
                    .with_context("status", format!("{:?}", status.code())),
            ))
        }
    }
}

impl Toolset for SystemTools {
    fn name(&self) -> &str {
        "system"
    }

    fn probe(&self) -> Result<(), ChkError> {
        for (label, tool) in [("grep", &self.grep), ("sed", &self.sed)] {
            if !tool.is_file() {
                return Err(capability_error(
                    "tool-vanished",
                    format!("`{label}` is no longer available at {}", tool.display()),
                ));
            }
        }
        Ok(())
    }
}
