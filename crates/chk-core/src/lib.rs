#![deny(missing_docs)]
#![doc = "Outcome model, run recorder, clock sources and report configuration for chk."]

pub mod clock;
pub mod config;
pub mod errors;
/// Per-check outcome types.
pub mod outcome;
/// Append-only run recorder and finalized summaries.
pub mod recorder;

pub use clock::{Clock, ManualClock, SystemClock, TIMESTAMP_FORMAT};
pub use config::{
    script_base_name, FormatChoice, ReportConfiguration, ReportFormat, FORMAT_ENV, QUIET_ENV,
};
pub use errors::{ChkError, ErrorInfo, FATAL_EXIT_CODE};
pub use outcome::{CheckOutcome, CheckStatus};
pub use recorder::{Run, RunSummary, DEFAULT_SUITE_NAME};
