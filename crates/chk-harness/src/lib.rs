#![deny(missing_docs)]
#![doc = "Assertion engine, host capabilities and run controller for chk."]

pub mod assertions;
pub mod capability;
pub mod harness;
mod narrate;

pub use capability::{
    find_in_path, NativeTools, SedFlavor, StreamEdit, SystemTools, TextSearch, Toolset,
};
pub use harness::{Harness, HarnessBuilder, RunOutcome};
