use crate::error::{AcpError, Result};
use crate::process::{format_command, CommandOutput, CommandRunner};

/// Thin wrapper around the `git` CLI.
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Run git and return trimmed stdout, failing on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.runner.run("git", args)?;
        check("git", args, &output)?;
        Ok(output.stdout_trimmed().to_string())
    }

    /// Run git and report whether it exited successfully.
    fn succeeds(&self, args: &[&str]) -> Result<bool> {
        Ok(self.runner.run("git", args)?.success())
    }

    /// Get the current branch name
    pub fn current_branch(&self) -> Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Check whether the index differs from HEAD.
    pub fn has_staged_changes(&self) -> Result<bool> {
        // --quiet exits 1 when there are differences
        Ok(!self.succeeds(&["diff", "--cached", "--quiet"])?)
    }

    /// Check whether the working tree has changes not yet added to the index.
    pub fn has_unstaged_changes(&self) -> Result<bool> {
        Ok(!self.succeeds(&["diff", "--quiet"])?)
    }

    /// Stage every working-tree change (`git add -A`).
    pub fn add_all(&self) -> Result<()> {
        self.run(&["add", "-A"]).map(|_| ())
    }

    /// URL of the named remote, or `None` when the remote is not configured.
    pub fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        let output = self.runner.run("git", &["remote", "get-url", remote])?;
        if !output.success() {
            return Ok(None);
        }
        let url = output.stdout_trimmed();
        Ok((!url.is_empty()).then(|| url.to_string()))
    }

    /// Checkout an existing branch
    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch]).map(|_| ())
    }

    /// Create and checkout a new branch from HEAD
    pub fn create_and_checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", "-b", branch]).map(|_| ())
    }

    /// Commit the index. Runs with terminal passthrough so hooks can prompt.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_interactive(&["commit", "-m", message])
    }

    /// Push `branch` to `remote` with upstream tracking. Hooks may prompt.
    pub fn push_set_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        self.run_interactive(&["push", "-u", remote, branch])
    }

    fn run_interactive(&self, args: &[&str]) -> Result<()> {
        let output = self.runner.run_interactive("git", args)?;
        check("git", args, &output)
    }

    /// Shelve unstaged work under a searchable message.
    pub fn stash_push(&self, label: &str) -> Result<()> {
        self.run(&["stash", "push", "-m", label]).map(|_| ())
    }

    /// Re-apply and drop the most recent stash entry.
    pub fn stash_pop(&self) -> Result<()> {
        self.run(&["stash", "pop"]).map(|_| ())
    }

    /// Force-delete a local branch.
    pub fn delete_local_branch(&self, branch: &str) -> Result<()> {
        self.run(&["branch", "-D", branch]).map(|_| ())
    }

    /// Delete the local remote-tracking ref `<remote>/<branch>`.
    pub fn delete_remote_tracking_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["branch", "-dr", &format!("{}/{}", remote, branch)])
            .map(|_| ())
    }

    /// Fast-forward the current branch from its upstream.
    pub fn pull(&self) -> Result<()> {
        self.run(&["pull", "--ff-only"]).map(|_| ())
    }
}

/// Turn a non-zero exit into [`AcpError::CommandFailed`] with git's own message.
pub(crate) fn check(program: &str, args: &[&str], output: &CommandOutput) -> Result<()> {
    if output.success() {
        return Ok(());
    }
    Err(AcpError::CommandFailed {
        command: format_command(program, args),
        stderr: output.error_text(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fail, ok, FakeRunner};

    #[test]
    fn test_current_branch_trims_output() {
        let runner = FakeRunner::new();
        runner.on(&["git", "rev-parse", "--abbrev-ref", "HEAD"], ok("main\n"));

        let git = Git::new(&runner);
        assert_eq!(git.current_branch().unwrap(), "main");
    }

    #[test]
    fn test_staged_changes_from_diff_exit_status() {
        let runner = FakeRunner::new();
        runner.on(&["git", "diff", "--cached", "--quiet"], fail(""));
        assert!(Git::new(&runner).has_staged_changes().unwrap());

        let runner = FakeRunner::new();
        runner.on(&["git", "diff", "--cached", "--quiet"], ok(""));
        assert!(!Git::new(&runner).has_staged_changes().unwrap());
    }

    #[test]
    fn test_unstaged_changes_from_diff_exit_status() {
        let runner = FakeRunner::new();
        runner.on(&["git", "diff", "--quiet"], fail(""));
        assert!(Git::new(&runner).has_unstaged_changes().unwrap());
    }

    #[test]
    fn test_remote_url_missing_remote_is_none() {
        let runner = FakeRunner::new();
        runner.on(
            &["git", "remote", "get-url", "upstream"],
            fail("error: No such remote 'upstream'"),
        );
        assert_eq!(Git::new(&runner).remote_url("upstream").unwrap(), None);
    }

    #[test]
    fn test_remote_url_present() {
        let runner = FakeRunner::new();
        runner.on(
            &["git", "remote", "get-url", "origin"],
            ok("git@github.com:me/repo.git\n"),
        );
        assert_eq!(
            Git::new(&runner).remote_url("origin").unwrap().as_deref(),
            Some("git@github.com:me/repo.git")
        );
    }

    #[test]
    fn test_checkout_failure_surfaces_stderr() {
        let runner = FakeRunner::new();
        runner.on(
            &["git", "checkout", "main"],
            fail("error: Your local changes would be overwritten by checkout"),
        );

        let err = Git::new(&runner).checkout("main").unwrap_err();
        match err {
            AcpError::CommandFailed { command, stderr } => {
                assert_eq!(command, "git checkout main");
                assert!(stderr.contains("would be overwritten"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_commit_and_push_use_interactive_runner() {
        let runner = FakeRunner::new();
        let git = Git::new(&runner);
        git.commit("fix: typo").unwrap();
        git.push_set_upstream("origin", "acp/me/1").unwrap();

        let commit = &runner.calls_matching(&["git", "commit"])[0];
        assert_eq!(commit.argv, vec!["git", "commit", "-m", "fix: typo"]);
        assert!(commit.interactive);

        let push = &runner.calls_matching(&["git", "push"])[0];
        assert_eq!(push.argv, vec!["git", "push", "-u", "origin", "acp/me/1"]);
        assert!(push.interactive);
    }

    #[test]
    fn test_delete_remote_tracking_branch_argv() {
        let runner = FakeRunner::new();
        Git::new(&runner)
            .delete_remote_tracking_branch("origin", "acp/me/1")
            .unwrap();
        assert!(runner.called(&["git", "branch", "-dr", "origin/acp/me/1"]));
    }
}
