use std::process::ExitCode;

use chk_core::{ChkError, FATAL_EXIT_CODE};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    doctor::{self, DoctorArgs},
    run::{self, RunArgs},
};

mod commands;
mod plan;

#[derive(Parser, Debug)]
#[command(name = "chk", about = "Run script checks and emit CI reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a YAML check plan and report the results.
    Run(RunArgs),
    /// Probe the text-search and stream-edit toolsets on this host.
    Doctor(DoctorArgs),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let result: Result<u8, ChkError> = match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Doctor(args) => doctor::run(&args),
    };
    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!(code = %err.info().code, "aborting");
            eprintln!("chk: [{}] {err}", err.info().code);
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}
