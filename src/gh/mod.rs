//! GitHub CLI integration.
//!
//! # Modules
//!
//! - [`types`] - Repository, fork and PR types
//! - [`remote`] - Remote URL parsing and fork detection
//! - [`api`] - `gh api` queries (user, branch refs)
//! - [`pr`] - PR creation and merging

mod api;
mod pr;
mod remote;
mod types;

pub use api::GitHub;
pub use pr::{extract_pr_url, new_pull_request_url, PrRequest};
pub use remote::{parse_remote_url, resolve_fork_context};
pub use types::{ForkContext, MergeMethod, PullRequestResult, RepoRef};
