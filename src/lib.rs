pub mod branch;
pub mod completion;
pub mod config;
pub mod context;
pub mod error;
pub mod gh;
pub mod git;
pub mod logging;
pub mod output;
pub mod process;
pub mod signal;
pub mod workflow;
pub mod workspace;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use context::Context;
pub use error::{AcpError, Result};
pub use process::{CommandRunner, SystemRunner};
pub use workflow::{checkout_branch, create_pr, Outcome, PrOptions, PrReport};
