use chk_core::RunSummary;

const GREEN: &str = "\x1b[0;32m";
const RED: &str = "\x1b[0;31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const RULE: &str = "========================================";

/// Whether console output carries ANSI colour codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStyle {
    /// No escape sequences.
    Plain,
    /// ANSI colours.
    Color,
}

impl ConsoleStyle {
    fn paint(&self, code: &str, text: &str) -> String {
        match self {
            ConsoleStyle::Plain => text.to_string(),
            ConsoleStyle::Color => format!("{code}{text}{RESET}"),
        }
    }
}

/// Renders the end-of-run summary block.
///
/// The all-passed banner appears only when at least one check passed and
/// none failed.
pub fn render_console(summary: &RunSummary, style: ConsoleStyle) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&style.paint(BOLD, &format!("Test Summary: {}", summary.suite_name)));
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Total:  {}\n", summary.total));
    out.push_str(&style.paint(GREEN, &format!("Passed: {}", summary.passed)));
    out.push('\n');
    let failed = format!("Failed: {}", summary.failed);
    if summary.failed > 0 {
        out.push_str(&style.paint(RED, &failed));
    } else {
        out.push_str(&failed);
    }
    out.push('\n');
    out.push_str(&format!("Duration: {}ms\n", summary.duration_ms));
    if summary.all_passed_banner() {
        out.push_str(&style.paint(GREEN, "All tests passed!"));
        out.push('\n');
    }
    out
}
