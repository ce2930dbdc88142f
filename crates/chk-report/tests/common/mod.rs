use chk_core::{CheckStatus, Run, RunSummary};

pub const TRICKY: &str = "say \"hi\"\nback\\slash\ttab\rcr <b>&'x'";

/// Three checks: pass, fail with a hostile message, pass.
pub fn sample_summary() -> RunSummary {
    let mut run = Run::new();
    run.begin_suite("Deploy <prod>", 10_000, "2024-03-01T09:30:00+0100".to_string());
    run.record(CheckStatus::Passed, "config present", "", 4)
        .unwrap();
    run.record(CheckStatus::Failed, "banner matches", TRICKY, 1_250)
        .unwrap();
    run.record(CheckStatus::Passed, "service answers", "", 7)
        .unwrap();
    run.summarize(12_345, || unreachable!("timestamp fixed by suite header"))
}

pub fn empty_summary() -> RunSummary {
    Run::new().summarize(5_000, || "2024-03-01T09:30:00+0100".to_string())
}
