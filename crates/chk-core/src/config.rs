//! Report configuration resolved once per run.
//!
//! Precedence is explicit argument, then environment, then built-in default.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ChkError, ErrorInfo};

/// Environment variable holding the default report format.
pub const FORMAT_ENV: &str = "CHK_OUTPUT_FORMAT";
/// Environment variable enabling quiet mode by default.
pub const QUIET_ENV: &str = "CHK_QUIET";

/// Output formats understood by the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Console summary only.
    #[default]
    None,
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
    /// Comma separated rows.
    Csv,
    /// JUnit XML.
    Junit,
}

impl ReportFormat {
    /// Parses a flag value such as `json`. Matching ignores ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Some(ReportFormat::None),
            "json" => Some(ReportFormat::Json),
            "yaml" => Some(ReportFormat::Yaml),
            "csv" => Some(ReportFormat::Csv),
            "junit" => Some(ReportFormat::Junit),
            _ => None,
        }
    }

    /// File extension used for default destinations.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::None => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
            ReportFormat::Csv => "csv",
            ReportFormat::Junit => "xml",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportFormat::None => "none",
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
            ReportFormat::Csv => "csv",
            ReportFormat::Junit => "junit",
        };
        f.write_str(label)
    }
}

/// Format as requested by the caller. Unknown values are kept verbatim and
/// only rejected when the run is finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatChoice {
    /// A supported format.
    Known(ReportFormat),
    /// A value that matched no supported format.
    Unrecognized(String),
}

impl Default for FormatChoice {
    fn default() -> Self {
        FormatChoice::Known(ReportFormat::None)
    }
}

impl FormatChoice {
    fn from_value(value: &str) -> Self {
        match ReportFormat::parse(value) {
            Some(format) => FormatChoice::Known(format),
            None => FormatChoice::Unrecognized(value.to_string()),
        }
    }

    /// Returns the supported format or a configuration error naming the value.
    pub fn resolve(&self) -> Result<ReportFormat, ChkError> {
        match self {
            FormatChoice::Known(format) => Ok(*format),
            FormatChoice::Unrecognized(value) => Err(ChkError::Config(
                ErrorInfo::new(
                    "unknown-format",
                    format!("unsupported report format `{value}`"),
                )
                .with_context("format", value.clone())
                .with_hint("expected one of none, json, yaml, csv, junit"),
            )),
        }
    }
}

/// Resolved run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfiguration {
    /// Requested output format.
    pub format: FormatChoice,
    /// Explicit destination, if one was given.
    pub output: Option<PathBuf>,
    /// Suppress per-check narration.
    pub quiet: bool,
    /// Base name of the invoking script, used for default file names.
    pub script_name: String,
}

impl Default for ReportConfiguration {
    fn default() -> Self {
        Self {
            format: FormatChoice::default(),
            output: None,
            quiet: false,
            script_name: "script".to_string(),
        }
    }
}

#[derive(Default)]
struct ExplicitFlags {
    format: Option<String>,
    output: Option<PathBuf>,
    quiet: bool,
}

fn parse_flags<I, S>(args: I) -> ExplicitFlags
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = ExplicitFlags::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let arg = arg.as_ref();
        if let Some(value) = arg.strip_prefix("--format=") {
            flags.format = Some(value.to_string());
        } else if arg == "--format" {
            if let Some(value) = iter.next() {
                flags.format = Some(value.as_ref().to_string());
            }
        } else if let Some(value) = arg.strip_prefix("--output=") {
            flags.output = Some(PathBuf::from(value));
        } else if arg == "--output" {
            if let Some(value) = iter.next() {
                flags.output = Some(PathBuf::from(value.as_ref()));
            }
        } else if arg == "--quiet" || arg == "-q" {
            flags.quiet = true;
        }
    }
    flags
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Derives the script base name (file stem) from a path or program name.
pub fn script_base_name(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "script".to_string())
}

impl ReportConfiguration {
    /// Resolves configuration from arguments and an environment lookup.
    ///
    /// Every argument is inspected once; unrecognized arguments are ignored.
    pub fn resolve<I, S, E>(args: I, script_name: impl Into<String>, env: E) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: Fn(&str) -> Option<String>,
    {
        let flags = parse_flags(args);
        let format = flags
            .format
            .or_else(|| env(FORMAT_ENV).filter(|value| !value.is_empty()))
            .map(|value| FormatChoice::from_value(&value))
            .unwrap_or_default();
        let quiet = flags.quiet || env(QUIET_ENV).map(|value| truthy(&value)).unwrap_or(false);
        Self {
            format,
            output: flags.output,
            quiet,
            script_name: script_name.into(),
        }
    }

    /// Resolves a full command line whose first element is the program path.
    /// The program's base name becomes the default file stem.
    pub fn from_command_line<I, S, E>(argv: I, env: E) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: Fn(&str) -> Option<String>,
    {
        let mut argv = argv.into_iter();
        let script_name = argv
            .next()
            .map(|program| script_base_name(program.as_ref()))
            .unwrap_or_else(|| script_base_name(""));
        Self::resolve(argv, script_name, env)
    }

    /// Resolves configuration against the process environment.
    pub fn from_process_env<I, S>(args: I, script_name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::resolve(args, script_name, |key| std::env::var(key).ok())
    }

    /// Default file name for `format`: `test-results-<script>.<ext>`.
    pub fn default_file_name(&self, format: ReportFormat) -> PathBuf {
        PathBuf::from(format!(
            "test-results-{}.{}",
            self.script_name,
            format.extension()
        ))
    }

    /// Where the payload goes: the explicit path, the derived default for a
    /// structured format, or `None` for stdout.
    pub fn destination(&self, format: ReportFormat) -> Option<PathBuf> {
        match (&self.output, format) {
            (Some(path), _) => Some(path.clone()),
            (None, ReportFormat::None) => None,
            (None, format) => Some(self.default_file_name(format)),
        }
    }
}
