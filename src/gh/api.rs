//! Authenticated GitHub queries through `gh api`.

use tracing::debug;

use crate::error::{AcpError, Result};
use crate::git::check;
use crate::process::{CommandOutput, CommandRunner};

use super::types::RepoRef;

/// Thin wrapper around the `gh` CLI.
pub struct GitHub<'a> {
    runner: &'a dyn CommandRunner,
    host: &'a str,
}

impl<'a> GitHub<'a> {
    pub fn new(runner: &'a dyn CommandRunner, host: &'a str) -> Self {
        Self { runner, host }
    }

    /// Hosting domain used for URLs and remote parsing.
    pub fn host(&self) -> &str {
        self.host
    }

    pub(super) fn output(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run("gh", args)
    }

    /// Run gh and return trimmed stdout, failing on a non-zero exit.
    pub(super) fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        check("gh", args, &output)?;
        Ok(output.stdout_trimmed().to_string())
    }

    /// Fail early with [`AcpError::CommandNotFound`] when `gh` is missing.
    pub fn ensure_installed(&self) -> Result<()> {
        self.run(&["--version"]).map(|_| ())
    }

    /// Login of the authenticated user.
    pub fn current_user(&self) -> Result<String> {
        let login = self.run(&["api", "user", "--jq", ".login"])?;
        if login.is_empty() {
            return Err(AcpError::UnknownUser);
        }
        Ok(login)
    }

    /// Whether `login` is a real GitHub account.
    pub fn user_exists(&self, login: &str) -> Result<bool> {
        Ok(self.output(&["api", &format!("users/{}", login)])?.success())
    }

    /// Whether `refs/heads/<branch>` exists in `repo`.
    ///
    /// Any failed lookup counts as "gone"; callers only use this to decide
    /// whether a delete is worth attempting.
    pub fn branch_exists(&self, repo: &RepoRef, branch: &str) -> Result<bool> {
        let path = format!("repos/{}/git/ref/heads/{}", repo, branch);
        let output = self.output(&["api", &path, "--silent"])?;
        debug!(repo = %repo, branch, exists = output.success(), "checked remote branch");
        Ok(output.success())
    }

    /// Delete `refs/heads/<branch>` in `repo`.
    ///
    /// A ref that is already gone is not an error: GitHub may have deleted
    /// it on merge between our check and this call.
    pub fn delete_branch(&self, repo: &RepoRef, branch: &str) -> Result<()> {
        let path = format!("repos/{}/git/refs/heads/{}", repo, branch);
        let args = ["api", "-X", "DELETE", path.as_str(), "--silent"];
        let output = self.output(&args)?;
        if output.success() || is_missing_ref(&output.error_text()) {
            return Ok(());
        }
        check("gh", &args, &output)
    }
}

fn is_missing_ref(stderr: &str) -> bool {
    stderr.contains("Reference does not exist")
        || stderr.contains("Not Found")
        || stderr.contains("HTTP 404")
        || stderr.contains("HTTP 422")
}
