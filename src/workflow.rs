//! The `acp pr` and `acp checkout` workflows.
//!
//! `create_pr` runs strictly in order:
//!
//! 1. validate options, check that `gh` is installed
//! 2. optionally stage everything, record the original branch, require staged changes
//! 3. resolve the fork context and name the temp branch
//! 4. create the temp branch, commit, push
//! 5. switch back to the original branch (stash guard)
//! 6. print a creation URL (interactive) or create the PR
//! 7. optionally merge (plus cleanup and sync) or enable auto-merge
//!
//! Any failure in steps 4-6 restores the original branch best-effort before
//! the error is returned. Failures in step 7 happen after the PR URL has
//! been printed and surface as [`AcpError::MergeFailed`] or
//! [`AcpError::AutoMergeFailed`], or as [`AcpError::Interrupted`] after Ctrl+C.

use tracing::{debug, info, warn};

use crate::branch::{cleanup_after_merge, create_and_push, generate_temp_branch_name};
use crate::branch::{CleanupReport, TempBranch};
use crate::context::Context;
use crate::error::{AcpError, Result};
use crate::gh::{
    new_pull_request_url, resolve_fork_context, ForkContext, MergeMethod, PrRequest,
    PullRequestResult,
};
use crate::output::{
    print_auto_merge_enabled, print_branch_state, print_checked_out, print_pr_created,
    print_pr_creation_url, print_pr_merged, print_synced, print_verbose, print_warning,
};
use crate::workspace::{switch_back, RestoreOutcome};

// ============================================================================
// Options
// ============================================================================

/// Everything `acp pr` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrOptions {
    /// Commit message, reused as the PR title
    pub message: String,
    pub body: String,
    /// Print a browser URL instead of creating the PR
    pub interactive: bool,
    pub merge: bool,
    pub auto_merge: bool,
    pub merge_method: MergeMethod,
    /// Pull the original branch after `merge`; ignored otherwise
    pub sync: bool,
    /// Run `git add -A` first
    pub stage_all: bool,
    pub reviewers: Vec<String>,
}

impl PrOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            body: String::new(),
            interactive: false,
            merge: false,
            auto_merge: false,
            merge_method: MergeMethod::default(),
            sync: false,
            stage_all: false,
            reviewers: Vec::new(),
        }
    }

    /// Reject option combinations that cannot run. No side effects.
    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(AcpError::InvalidOptions(
                "Commit message cannot be empty".to_string(),
            ));
        }
        if self.interactive && (self.merge || self.auto_merge) {
            return Err(AcpError::InvalidOptions(
                "--interactive cannot be combined with --merge or --auto-merge".to_string(),
            ));
        }
        if self.merge && self.auto_merge {
            return Err(AcpError::InvalidOptions(
                "--merge and --auto-merge are mutually exclusive".to_string(),
            ));
        }
        if self.interactive && (!self.body.is_empty() || !self.reviewers.is_empty()) {
            return Err(AcpError::InvalidOptions(
                "--body and --reviewers cannot be used with --interactive; \
                 set them on the PR creation page instead"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Split `a, b,,c` into `["a", "b", "c"]`.
pub fn parse_reviewers(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect()
}

// ============================================================================
// Results
// ============================================================================

/// The single thing a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Interactive { url: String },
    Created(PullRequestResult),
    Merged(PullRequestResult),
    AutoMergeEnabled(PullRequestResult),
}

/// Summary of a completed `create_pr` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrReport {
    pub original_branch: String,
    pub temp_branch: TempBranch,
    pub fork: ForkContext,
    pub outcome: Outcome,
    pub restore: RestoreOutcome,
    /// Set only after an immediate merge
    pub cleanup: Option<CleanupReport>,
    pub synced: bool,
}

// ============================================================================
// Workflows
// ============================================================================

/// Turn the staged changes into a pull request without leaving the current branch.
pub fn create_pr(ctx: &Context<'_>, options: &PrOptions) -> Result<PrReport> {
    options.validate()?;

    let git = ctx.git();
    ctx.github().ensure_installed()?;

    if options.stage_all {
        git.add_all()?;
    }

    let original = git.current_branch()?;
    print_verbose(ctx.verbose, &format!("Current branch: {}", original));

    if !git.has_staged_changes()? {
        return Err(AcpError::NoStagedChanges);
    }

    let fork = resolve_fork_context(&git, &ctx.config.host)?;
    debug!(
        fork = %fork.fork_repo,
        upstream = %fork.upstream_repo,
        is_fork = fork.is_fork,
        "resolved repositories"
    );

    let branch = generate_temp_branch_name(ctx)?;
    print_verbose(
        ctx.verbose,
        &format!("Creating temporary branch: {}", branch),
    );
    ctx.signals.check()?;

    let (restore, outcome) = match publish(ctx, options, &original, &branch, &fork) {
        Ok(published) => published,
        Err(_) if ctx.signals.is_shutdown_requested() => return Err(AcpError::Interrupted),
        Err(e) => {
            recover(ctx, &original);
            return Err(e);
        }
    };

    let mut report = PrReport {
        original_branch: original,
        temp_branch: branch,
        fork,
        outcome,
        restore,
        cleanup: None,
        synced: false,
    };

    let pr = match &report.outcome {
        Outcome::Interactive { url } => {
            print_pr_creation_url(url);
            return Ok(report);
        }
        Outcome::Created(pr) | Outcome::Merged(pr) | Outcome::AutoMergeEnabled(pr) => pr.clone(),
    };
    print_pr_created(&pr.url);
    info!(url = %pr.url, "pull request created");

    if options.merge {
        merge(ctx, options, &mut report, pr)?;
    } else if options.auto_merge {
        ctx.github()
            .enable_auto_merge(&pr, &report.fork.upstream_repo, options.merge_method)
            .map_err(|e| {
                partial_failure(ctx, e, &pr, |url, stderr| AcpError::AutoMergeFailed { url, stderr })
            })?;
        print_auto_merge_enabled(&pr.url, options.merge_method.as_str());
        report.outcome = Outcome::AutoMergeEnabled(pr);
    }

    Ok(report)
}

/// Branch, commit, push, switch back, then produce the PR (or its URL).
fn publish(
    ctx: &Context<'_>,
    options: &PrOptions,
    original: &str,
    branch: &TempBranch,
    fork: &ForkContext,
) -> Result<(RestoreOutcome, Outcome)> {
    create_and_push(ctx, branch, &options.message, fork)?;
    let restore = switch_back(ctx, original)?;
    ctx.signals.check()?;

    if options.interactive {
        let url = new_pull_request_url(&ctx.config.host, &fork.fork_repo, branch.as_str());
        return Ok((restore, Outcome::Interactive { url }));
    }

    print_verbose(
        ctx.verbose,
        &format!("Creating PR to: {}", fork.upstream_repo),
    );
    let head = fork.head_ref(branch.as_str());
    let pr = ctx.github().create_pull_request(&PrRequest {
        repo: &fork.upstream_repo,
        title: &options.message,
        body: &options.body,
        head: &head,
        reviewers: &options.reviewers,
    })?;

    Ok((restore, Outcome::Created(pr)))
}

/// Merge now, then clean up the temp branch and optionally pull.
fn merge(
    ctx: &Context<'_>,
    options: &PrOptions,
    report: &mut PrReport,
    pr: PullRequestResult,
) -> Result<()> {
    ctx.github()
        .merge_pull_request(&pr, &report.fork.upstream_repo, options.merge_method)
        .map_err(|e| {
            partial_failure(ctx, e, &pr, |url, stderr| AcpError::MergeFailed { url, stderr })
        })?;
    print_pr_merged(&pr.url, options.merge_method.as_str());

    report.cleanup = Some(cleanup_after_merge(
        ctx,
        &report.fork.fork_repo,
        &report.temp_branch,
    ));
    report.outcome = Outcome::Merged(pr);

    if options.sync {
        match ctx.git().pull() {
            Ok(()) => {
                print_synced(&report.original_branch);
                report.synced = true;
            }
            Err(_) if ctx.signals.is_shutdown_requested() => return Err(AcpError::Interrupted),
            Err(e) => {
                warn!(branch = %report.original_branch, error = %e, "sync failed");
                print_warning(&format!(
                    "Could not sync {}: {}",
                    report.original_branch, e
                ));
            }
        }
    }

    Ok(())
}

/// Attach the PR URL to a failed merge step; other errors pass through.
///
/// A step killed by Ctrl+C is reported as [`AcpError::Interrupted`].
fn partial_failure(
    ctx: &Context<'_>,
    error: AcpError,
    pr: &PullRequestResult,
    wrap: impl FnOnce(String, String) -> AcpError,
) -> AcpError {
    if ctx.signals.is_shutdown_requested() {
        return AcpError::Interrupted;
    }
    match error {
        AcpError::CommandFailed { stderr, .. } => wrap(pr.url.clone(), stderr),
        other => other,
    }
}

/// Best-effort return to `original` after a failed publish.
fn recover(ctx: &Context<'_>, original: &str) {
    let git = ctx.git();

    if git.current_branch().ok().as_deref() != Some(original) {
        if let Err(e) = git.checkout(original) {
            warn!(branch = original, error = %e, "could not restore original branch");
        }
    }

    print_branch_state(git.current_branch().ok().as_deref(), original);
}

/// Check out `name`, accepting GitHub's `user:branch` notation.
///
/// The `user:` part is dropped only when it names a real GitHub account;
/// otherwise the name is used literally.
pub fn checkout_branch(ctx: &Context<'_>, name: &str) -> Result<String> {
    let target = match name.split_once(':') {
        Some((user, branch))
            if !user.is_empty() && !branch.is_empty() && confirmed_user(ctx, user) =>
        {
            branch
        }
        _ => name,
    };

    ctx.git().checkout(target)?;
    print_checked_out(target);
    Ok(target.to_string())
}

/// Whether `gh` confirms `user` exists. Any failure to ask counts as no.
fn confirmed_user(ctx: &Context<'_>, user: &str) -> bool {
    ctx.github().user_exists(user).unwrap_or_else(|e| {
        debug!(user, error = %e, "could not look up user");
        false
    })
}
