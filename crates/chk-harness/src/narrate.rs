use std::io::Write;

use chk_report::ConsoleStyle;
use tracing::warn;

const GREEN: &str = "\x1b[0;32m";
const RED: &str = "\x1b[0;31m";
const YELLOW: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

/// Per-check console feedback plus the sink the final payload is printed to.
pub(crate) struct Narrator {
    quiet: bool,
    style: ConsoleStyle,
    out: Box<dyn Write>,
}

impl Narrator {
    pub(crate) fn new(quiet: bool, style: ConsoleStyle, out: Box<dyn Write>) -> Self {
        Self { quiet, style, out }
    }

    pub(crate) fn style(&self) -> ConsoleStyle {
        self.style
    }

    fn paint(&self, code: &str, text: &str) -> String {
        match self.style {
            ConsoleStyle::Plain => text.to_string(),
            ConsoleStyle::Color => format!("{code}{text}{RESET}"),
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            warn!(%err, "dropping console narration");
        }
    }

    pub(crate) fn suite(&mut self, name: &str) {
        if self.quiet {
            return;
        }
        let header = self.paint(YELLOW, &format!("Running test suite: {name}"));
        self.line(&header);
    }

    pub(crate) fn pass(&mut self, description: &str) {
        if self.quiet {
            return;
        }
        let text = self.paint(GREEN, &format!("✓ {description}"));
        self.line(&text);
    }

    pub(crate) fn fail(&mut self, description: &str, message: &str) {
        if self.quiet {
            return;
        }
        let text = self.paint(RED, &format!("✗ {description}"));
        self.line(&text);
        if !message.is_empty() {
            self.line(&format!("  {message}"));
        }
    }

    /// Narration that quiet mode suppresses.
    pub(crate) fn note(&mut self, text: &str) {
        if !self.quiet {
            self.line(text);
        }
    }

    /// The final payload. Never suppressed.
    pub(crate) fn emit(&mut self, payload: &str) -> std::io::Result<()> {
        self.out.write_all(payload.as_bytes())?;
        self.out.flush()
    }
}
