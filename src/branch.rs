//! Temporary branch lifecycle: naming, publishing and post-merge cleanup.

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use tracing::debug;

use crate::context::Context;
use crate::error::Result;
use crate::gh::{ForkContext, RepoRef};
use crate::output::{print_verbose, print_warning};

/// Uniform range for the numeric suffix: always exactly 16 digits.
pub const BRANCH_NUMBER_RANGE: RangeInclusive<u64> = 1_000_000_000_000_000..=9_999_999_999_999_999;

/// Short-lived branch carrying one staged change set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempBranch {
    pub name: String,
}

impl TempBranch {
    pub fn new(prefix: &str, user: &str, number: u64) -> Self {
        Self {
            name: format!("{}/{}/{}", prefix, user, number),
        }
    }

    /// Draw a fresh name `<prefix>/<user>/<16 digits>`.
    ///
    /// There is no uniqueness check; a collision within one user's
    /// namespace is not handled.
    pub fn generate<R: Rng>(prefix: &str, user: &str, rng: &mut R) -> Self {
        Self::new(prefix, user, rng.gen_range(BRANCH_NUMBER_RANGE))
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TempBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Name a temp branch after the authenticated GitHub user.
pub fn generate_temp_branch_name(ctx: &Context<'_>) -> Result<TempBranch> {
    let user = ctx.github().current_user()?;
    let branch = TempBranch::generate(ctx.config.prefix(), &user, &mut rand::thread_rng());
    debug!(branch = %branch, "generated temp branch name");
    Ok(branch)
}

/// Create the temp branch from HEAD, commit the index and push to `origin`.
///
/// Commit and push run with terminal passthrough because hooks may prompt.
pub fn create_and_push(
    ctx: &Context<'_>,
    branch: &TempBranch,
    message: &str,
    fork: &ForkContext,
) -> Result<()> {
    let git = ctx.git();

    git.create_and_checkout(branch.as_str())?;

    print_verbose(ctx.verbose, &format!("Committing: {}", message));
    git.commit(message)?;
    ctx.signals.check()?;

    print_verbose(
        ctx.verbose,
        &format!("Pushing branch {} to {}...", branch, fork.fork_repo),
    );
    git.push_set_upstream("origin", branch.as_str())?;
    ctx.signals.check()
}

/// What [`cleanup_after_merge`] managed to remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// The remote ref was already gone when checked
    pub remote_already_gone: bool,
    pub remote_deleted: bool,
    pub local_deleted: bool,
    pub tracking_deleted: bool,
}

/// Best-effort removal of the temp branch after an immediate merge.
///
/// `repo` is the repository the branch was pushed to. If the remote ref is
/// already gone (GitHub often deletes it on merge) only local refs are
/// removed. Failures are logged, never returned.
pub fn cleanup_after_merge(ctx: &Context<'_>, repo: &RepoRef, branch: &TempBranch) -> CleanupReport {
    let gh = ctx.github();
    let git = ctx.git();
    let mut report = CleanupReport::default();

    match gh.branch_exists(repo, branch.as_str()) {
        Ok(true) => match gh.delete_branch(repo, branch.as_str()) {
            Ok(()) => {
                report.remote_deleted = true;
                print_verbose(ctx.verbose, &format!("Deleted remote branch {}", branch));
            }
            Err(e) => cleanup_failed(ctx, "remote branch", branch, &e.to_string()),
        },
        Ok(false) => {
            report.remote_already_gone = true;
            print_verbose(
                ctx.verbose,
                &format!("Remote branch {} already deleted", branch),
            );
        }
        Err(e) => cleanup_failed(ctx, "remote branch", branch, &e.to_string()),
    }

    match git.delete_local_branch(branch.as_str()) {
        Ok(()) => report.local_deleted = true,
        Err(e) => cleanup_failed(ctx, "local branch", branch, &e.to_string()),
    }

    match git.delete_remote_tracking_branch("origin", branch.as_str()) {
        Ok(()) => report.tracking_deleted = true,
        Err(e) => debug!(branch = %branch, error = %e, "no remote-tracking ref to delete"),
    }

    report
}

/// Cleanup is a courtesy: failures stay below the default log level and
/// reach the user only with `--verbose`.
fn cleanup_failed(ctx: &Context<'_>, what: &str, branch: &TempBranch, error: &str) {
    debug!(branch = %branch, error, "failed to delete {}", what);
    if ctx.verbose {
        print_warning(&format!("Could not delete {} {}: {}", what, branch, error));
    }
}
