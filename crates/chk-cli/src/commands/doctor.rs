use chk_core::ChkError;
use chk_harness::{NativeTools, SystemTools, Toolset};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Emit only JSON without additional context.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Serialize)]
struct ToolsetCheck {
    name: String,
    ok: bool,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    status: String,
    platform: String,
    toolsets: Vec<ToolsetCheck>,
}

fn check(name: &str, probe: Result<String, ChkError>) -> ToolsetCheck {
    match probe {
        Ok(detail) => ToolsetCheck {
            name: name.into(),
            ok: true,
            detail,
        },
        Err(err) => ToolsetCheck {
            name: name.into(),
            ok: false,
            detail: err.to_string(),
        },
    }
}

fn diagnose() -> DoctorReport {
    let native = check(
        "native",
        NativeTools.probe().map(|()| "in-process search and edit".to_string()),
    );
    let system = check(
        "system",
        SystemTools::detect().and_then(|tools| {
            tools.probe()?;
            Ok(format!("grep + {:?} sed", tools.flavor()))
        }),
    );
    let toolsets = vec![native, system];
    let status = if toolsets.iter().all(|check| check.ok) {
        "ok"
    } else {
        "needs-attention"
    };
    DoctorReport {
        status: status.into(),
        platform: std::env::consts::OS.into(),
        toolsets,
    }
}

/// Prints the probe report; exits `1` when any toolset is unusable.
pub fn run(args: &DoctorArgs) -> Result<u8, ChkError> {
    let report = diagnose();
    let rendered = serde_json::to_string_pretty(&report).map_err(|err| {
        ChkError::Serde(chk_core::ErrorInfo::new("doctor-serialize", err.to_string()))
    })?;
    if !args.quiet {
        println!("chk doctor status: {}", report.status);
    }
    println!("{rendered}");
    Ok(if report.status == "ok" { 0 } else { 1 })
}
