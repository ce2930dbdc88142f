pub mod doctor;
pub mod run;

use chk_core::ChkError;
use chk_harness::{NativeTools, SystemTools, Toolset};
use clap::ValueEnum;

/// Capability implementation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToolChoice {
    /// In-process search and edit.
    Native,
    /// Host `grep` and `sed`.
    System,
}

impl ToolChoice {
    pub fn resolve(self) -> Result<Box<dyn Toolset>, ChkError> {
        match self {
            ToolChoice::Native => Ok(Box::new(NativeTools)),
            ToolChoice::System => Ok(Box::new(SystemTools::detect()?)),
        }
    }
}
