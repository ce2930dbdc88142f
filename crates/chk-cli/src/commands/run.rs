use std::path::PathBuf;

use chk_core::{script_base_name, ChkError, ReportConfiguration};
use chk_harness::HarnessBuilder;
use clap::Args;
use tracing::info;

use super::ToolChoice;
use crate::plan::{execute, load_plan};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML plan listing the checks to execute.
    pub plan: PathBuf,
    /// Capability implementation for file search and editing.
    #[arg(long, value_enum, default_value_t = ToolChoice::Native)]
    pub tools: ToolChoice,
    /// Report options: --format F, --output PATH, --quiet. Anything else is ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub report_args: Vec<String>,
}

/// Executes a plan and returns the run's exit status.
pub fn run(args: &RunArgs) -> Result<u8, ChkError> {
    let plan = load_plan(&args.plan)?;
    let config =
        ReportConfiguration::from_process_env(&args.report_args, script_base_name(&args.plan));
    let mut harness = HarnessBuilder::new(config)
        .tools(args.tools.resolve()?)
        .initialize()?;
    let base = args
        .plan
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    execute(&plan, &base, &mut harness)?;
    let outcome = harness.finalize()?;
    info!(
        plan = %args.plan.display(),
        exit_code = outcome.exit_code(),
        "plan finished"
    );
    Ok(outcome.exit_code())
}
