//! Run controller: resolves configuration, owns the [`Run`], and finalizes it
//! into exactly one report.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use chk_core::{
    CheckStatus, ChkError, Clock, ErrorInfo, ReportConfiguration, ReportFormat, Run, RunSummary,
    SystemClock,
};
use chk_report::{render, render_console, ConsoleStyle};
use tracing::{debug, info};

use crate::capability::{NativeTools, Toolset};
use crate::narrate::Narrator;

/// Builder injecting the clock, toolset and stdout sink of a [`Harness`].
pub struct HarnessBuilder {
    config: ReportConfiguration,
    clock: Option<Box<dyn Clock>>,
    tools: Option<Box<dyn Toolset>>,
    out: Option<Box<dyn Write>>,
    style: Option<ConsoleStyle>,
}

impl HarnessBuilder {
    /// Starts from a resolved configuration.
    pub fn new(config: ReportConfiguration) -> Self {
        Self {
            config,
            clock: None,
            tools: None,
            out: None,
            style: None,
        }
    }

    /// Replaces the system clock.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Replaces the native toolset.
    pub fn tools(mut self, tools: Box<dyn Toolset>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Redirects narration and stdout payloads. Output is plain unless
    /// [`HarnessBuilder::style`] says otherwise.
    pub fn stdout(mut self, out: impl Write + 'static) -> Self {
        self.out = Some(Box::new(out));
        self
    }

    /// Forces console styling.
    pub fn style(mut self, style: ConsoleStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Probes the toolset and enters the initialized state.
    pub fn initialize(self) -> Result<Harness, ChkError> {
        let tools = self.tools.unwrap_or_else(|| Box::new(NativeTools));
        tools.probe()?;
        let (out, default_style): (Box<dyn Write>, ConsoleStyle) = match self.out {
            Some(out) => (out, ConsoleStyle::Plain),
            None => {
                let style = if io::stdout().is_terminal() {
                    ConsoleStyle::Color
                } else {
                    ConsoleStyle::Plain
                };
                let out: Box<dyn Write> = Box::new(io::stdout());
                (out, style)
            }
        };
        let style = self.style.unwrap_or(default_style);
        info!(
            format = ?self.config.format,
            output = ?self.config.output,
            quiet = self.config.quiet,
            tools = tools.name(),
            "initialized harness"
        );
        Ok(Harness {
            narrator: Narrator::new(self.config.quiet, style, out),
            config: self.config,
            run: Run::new(),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            tools,
        })
    }
}

/// Result of finalizing a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Frozen counts and outcomes.
    pub summary: RunSummary,
    /// File the payload was written to, if any.
    pub destination: Option<PathBuf>,
}

impl RunOutcome {
    /// `0` when nothing failed, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        self.summary.exit_code()
    }
}

/// An initialized run. Assertions can only be made through this type, so a
/// check can never be recorded before configuration is resolved.
pub struct Harness {
    pub(crate) config: ReportConfiguration,
    pub(crate) run: Run,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) tools: Box<dyn Toolset>,
    pub(crate) narrator: Narrator,
}

impl Harness {
    /// Initializes with native tools, the system clock and real stdout.
    pub fn initialize(config: ReportConfiguration) -> Result<Self, ChkError> {
        HarnessBuilder::new(config).initialize()
    }

    /// Initializes from the process arguments and environment. The default
    /// file stem is the program's base name.
    pub fn from_env_args() -> Result<Self, ChkError> {
        let config =
            ReportConfiguration::from_command_line(std::env::args(), |key| std::env::var(key).ok());
        Self::initialize(config)
    }

    /// Resolved configuration.
    pub fn config(&self) -> &ReportConfiguration {
        &self.config
    }

    /// Recorder state so far.
    pub fn run(&self) -> &Run {
        &self.run
    }

    /// Names the suite and starts its clock. Only the first header counts.
    pub fn suite(&mut self, name: &str) -> Result<(), ChkError> {
        if name.is_empty() {
            return Err(ChkError::Usage(ErrorInfo::new(
                "missing-suite-name",
                "suite header requires a name",
            )));
        }
        let now = self.clock.now_ms();
        let timestamp = self.clock.timestamp();
        if self.run.begin_suite(name, now, timestamp) {
            info!(suite = name, "suite started");
            self.narrator.suite(name);
        }
        Ok(())
    }

    /// Records an externally evaluated outcome without narration.
    pub fn record(
        &mut self,
        status: CheckStatus,
        description: &str,
        message: &str,
        duration_ms: u64,
    ) -> Result<(), ChkError> {
        self.mark_started();
        self.run.record(status, description, message, duration_ms)
    }

    /// Stream-edits `path` through the resolved capability.
    pub fn substitute_in_file(
        &self,
        path: impl AsRef<Path>,
        from: &str,
        to: &str,
    ) -> Result<(), ChkError> {
        self.tools.substitute(path.as_ref(), from, to)
    }

    pub(crate) fn mark_started(&mut self) {
        let now = self.clock.now_ms();
        let clock = &self.clock;
        self.run.ensure_started(now, || clock.timestamp());
    }

    /// Computes totals, emits the report and consumes the harness.
    ///
    /// An unrecognized format surfaces here as a [`ChkError::Config`] and no
    /// payload is produced.
    pub fn finalize(mut self) -> Result<RunOutcome, ChkError> {
        let format = self.config.format.resolve()?;
        self.mark_started();
        let now = self.clock.now_ms();
        let clock = &self.clock;
        let summary = self.run.summarize(now, || clock.timestamp());
        let destination = self.config.destination(format);
        debug!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            duration_ms = summary.duration_ms,
            "finalizing run"
        );

        match &destination {
            Some(path) => {
                let payload = render(&summary, format)?;
                write_payload(path, &payload)?;
                info!(path = %path.display(), %format, "report written");
                let console = render_console(&summary, self.narrator.style());
                self.narrator.note(console.trim_end());
                self.narrator
                    .note(&format!("Results written to {}", path.display()));
            }
            None => {
                debug_assert_eq!(format, ReportFormat::None);
                let console = render_console(&summary, self.narrator.style());
                self.narrator
                    .emit(&console)
                    .map_err(|err| ChkError::io("stdout-write", err, "<stdout>"))?;
            }
        }
        Ok(RunOutcome {
            summary,
            destination,
        })
    }
}

fn write_payload(path: &Path, payload: &str) -> Result<(), ChkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ChkError::io("output-dir", err, parent))?;
    }
    fs::write(path, payload).map_err(|err| ChkError::io("output-write", err, path))
}
