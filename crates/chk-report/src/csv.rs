use chk_core::{ChkError, RunSummary};

use crate::serde_error;

/// Header row, in column order.
pub const CSV_HEADER: [&str; 4] = ["Test Name", "Status", "Duration (ms)", "Message"];

/// Renders one row per outcome. Passed checks get an empty message column.
pub fn render_csv(summary: &RunSummary) -> Result<String, ChkError> {
    let mut wtr = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)
        .map_err(|err| serde_error("csv_write", err))?;
    for outcome in &summary.outcomes {
        wtr.write_record([
            outcome.description.as_str(),
            outcome.status.as_str(),
            outcome.duration_ms.to_string().as_str(),
            outcome.message.as_str(),
        ])
        .map_err(|err| serde_error("csv_write", err))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|err| serde_error("csv_flush", err))?;
    String::from_utf8(bytes).map_err(|err| serde_error("csv_utf8", err))
}
