use std::fmt::Write;

use chk_core::RunSummary;

use crate::escape::escape_xml;

/// Formats milliseconds as seconds with millisecond precision, e.g. `1.005`.
pub fn seconds(ms: u64) -> String {
    format!("{}.{:03}", ms / 1000, ms % 1000)
}

/// Renders a single `testsuite` document.
pub fn render_junit(summary: &RunSummary) -> String {
    let suite = escape_xml(&summary.suite_name);
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "<testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" time=\"{}\" timestamp=\"{}\">",
        suite,
        summary.total,
        summary.failed,
        seconds(summary.duration_ms),
        escape_xml(&summary.timestamp),
    );
    for outcome in &summary.outcomes {
        let name = escape_xml(&outcome.description);
        let time = seconds(outcome.duration_ms);
        if outcome.status.is_passed() {
            let _ = writeln!(
                out,
                "  <testcase name=\"{name}\" classname=\"{suite}\" time=\"{time}\"/>"
            );
        } else {
            let message = escape_xml(&outcome.message);
            let _ = writeln!(
                out,
                "  <testcase name=\"{name}\" classname=\"{suite}\" time=\"{time}\">"
            );
            let _ = writeln!(out, "    <failure message=\"{message}\">{message}</failure>");
            out.push_str("  </testcase>\n");
        }
    }
    out.push_str("</testsuite>\n");
    out
}
