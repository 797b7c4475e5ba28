//! Terminal output formatting for acp.
//!
//! Results go to stdout; errors, warnings and recovery hints go to stderr.
//!
//! - [`messages`] - Error, warning and verbose messages
//! - [`pr`] - Pull request workflow output

pub mod messages;
pub mod pr;

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

pub use messages::{print_cancelled, print_error, print_verbose, print_warning};
pub use pr::{
    print_auto_merge_enabled, print_branch_state, print_checked_out, print_pr_created,
    print_pr_creation_url, print_pr_merged, print_stash_kept, print_synced,
    stash_recovery_commands,
};
