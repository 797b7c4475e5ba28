//! Workspace guard: return to the original branch without losing unstaged work.
//!
//! Unstaged edits ride along onto the temp branch (only the index is
//! committed). Before switching back they are parked in a labelled stash
//! entry and popped again on the original branch. A pop that conflicts
//! leaves the entry in place and tells the user how to recover it; it never
//! fails the run.

use chrono::Utc;
use tracing::{debug, warn};

use crate::context::Context;
use crate::error::Result;
use crate::output::{print_stash_kept, print_verbose};

/// A labelled stash entry created by acp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashRecord {
    pub label: String,
}

impl StashRecord {
    /// `<prefix>-stash-<unix timestamp>`
    pub fn new(prefix: &str, timestamp: i64) -> Self {
        let prefix = prefix.replace('/', "-");
        Self {
            label: format!("{}-stash-{}", prefix, timestamp),
        }
    }

    pub fn now(prefix: &str) -> Self {
        Self::new(prefix, Utc::now().timestamp())
    }
}

/// How the switch back to the original branch went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// No unstaged changes; a plain checkout
    Clean,
    /// Unstaged changes were stashed and popped back
    StashRestored(StashRecord),
    /// The pop conflicted; the entry is still in the stash list
    StashConflict(StashRecord),
}

/// Check out `original`, carrying unstaged changes across via the stash.
///
/// Errors only when the checkout itself fails. If that happens after a
/// stash was created, the label and recovery commands are printed first.
pub fn switch_back(ctx: &Context<'_>, original: &str) -> Result<RestoreOutcome> {
    let git = ctx.git();

    let stash = if git.has_unstaged_changes()? {
        let record = StashRecord::now(ctx.config.prefix());
        print_verbose(
            ctx.verbose,
            &format!("Stashing unstaged changes as {}", record.label),
        );
        git.stash_push(&record.label)?;
        Some(record)
    } else {
        None
    };

    if let Err(e) = git.checkout(original) {
        if let Some(record) = &stash {
            print_stash_kept(&record.label, "checkout failed");
        }
        return Err(e);
    }
    print_verbose(
        ctx.verbose,
        &format!("Switched back to original branch: {}", original),
    );

    let Some(record) = stash else {
        return Ok(RestoreOutcome::Clean);
    };

    match git.stash_pop() {
        Ok(()) => {
            debug!(label = %record.label, "restored unstaged changes");
            Ok(RestoreOutcome::StashRestored(record))
        }
        Err(e) => {
            warn!(label = %record.label, error = %e, "stash pop failed");
            print_stash_kept(&record.label, "conflict");
            Ok(RestoreOutcome::StashConflict(record))
        }
    }
}
