#![deny(missing_docs)]
#![doc = "Report rendering for chk runs: console summary, JSON, YAML, CSV and JUnit XML."]

/// Human readable end-of-run summary.
pub mod console;
/// CSV rows.
pub mod csv;
/// Serde document shared by JSON and YAML.
pub mod document;
/// Escaping helpers for hand-written markup.
pub mod escape;
/// JUnit XML writer.
pub mod junit;

use chk_core::{ChkError, ErrorInfo, ReportFormat, RunSummary};

pub use console::{render_console, ConsoleStyle};
pub use document::{ReportDocument, SummaryCounts, TestEntry};
pub use escape::{escape_xml, unescape_xml};

pub(crate) fn serde_error(code: &str, err: impl ToString) -> ChkError {
    ChkError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Renders a JSON report.
pub fn render_json(summary: &RunSummary) -> Result<String, ChkError> {
    let mut body = serde_json::to_string_pretty(&ReportDocument::from_summary(summary))
        .map_err(|err| serde_error("json_serialize", err))?;
    body.push('\n');
    Ok(body)
}

/// Renders a YAML report with the same structure as [`render_json`].
pub fn render_yaml(summary: &RunSummary) -> Result<String, ChkError> {
    serde_yaml::to_string(&ReportDocument::from_summary(summary))
        .map_err(|err| serde_error("yaml_serialize", err))
}

/// Renders `summary` in `format`. [`ReportFormat::None`] yields the plain
/// console summary.
pub fn render(summary: &RunSummary, format: ReportFormat) -> Result<String, ChkError> {
    match format {
        ReportFormat::None => Ok(render_console(summary, ConsoleStyle::Plain)),
        ReportFormat::Json => render_json(summary),
        ReportFormat::Yaml => render_yaml(summary),
        ReportFormat::Csv => csv::render_csv(summary),
        ReportFormat::Junit => Ok(junit::render_junit(summary)),
    }
}
