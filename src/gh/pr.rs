//! PR creation and merging.

use crate::error::{AcpError, Result};
use crate::git::check;

use super::api::GitHub;
use super::types::{MergeMethod, PullRequestResult, RepoRef};

/// Everything `gh pr create` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRequest<'a> {
    /// Repository receiving the PR
    pub repo: &'a RepoRef,
    pub title: &'a str,
    pub body: &'a str,
    /// `branch` or `owner:branch`
    pub head: &'a str,
    pub reviewers: &'a [String],
}

impl PrRequest<'_> {
    /// Arguments for `gh`, excluding the program name.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "pr".to_string(),
            "create".to_string(),
            "--repo".to_string(),
            self.repo.to_string(),
            "--title".to_string(),
            self.title.to_string(),
            "--body".to_string(),
            self.body.to_string(),
            "--head".to_string(),
            self.head.to_string(),
        ];
        if !self.reviewers.is_empty() {
            args.push("--reviewer".to_string());
            args.push(self.reviewers.join(","));
        }
        args
    }
}

impl GitHub<'_> {
    /// Create a pull request and return its URL.
    pub fn create_pull_request(&self, request: &PrRequest<'_>) -> Result<PullRequestResult> {
        let owned = request.to_args();
        let args: Vec<&str> = owned.iter().map(String::as_str).collect();

        let stdout = self.run(&args)?;
        let url = extract_pr_url(&stdout, self.host())
            .or_else(|| stdout.lines().rev().map(str::trim).find(|l| !l.is_empty()).map(String::from))
            .ok_or_else(|| AcpError::CommandFailed {
                command: "gh pr create".to_string(),
                stderr: "no pull request URL in output".to_string(),
            })?;

        Ok(PullRequestResult { url })
    }

    /// Merge `pr` immediately.
    pub fn merge_pull_request(
        &self,
        pr: &PullRequestResult,
        repo: &RepoRef,
        method: MergeMethod,
    ) -> Result<()> {
        let repo = repo.to_string();
        let args = ["pr", "merge", pr.url.as_str(), "--repo", repo.as_str(), method.gh_flag()];
        let output = self.output(&args)?;
        check("gh", &args, &output)
    }

    /// Ask GitHub to merge `pr` once its checks pass.
    ///
    /// `--delete-branch` is deliberately absent: the branch must survive
    /// until the merge actually happens.
    pub fn enable_auto_merge(
        &self,
        pr: &PullRequestResult,
        repo: &RepoRef,
        method: MergeMethod,
    ) -> Result<()> {
        let repo = repo.to_string();
        let args = [
            "pr",
            "merge",
            pr.url.as_str(),
            "--repo",
            repo.as_str(),
            "--auto",
            method.gh_flag(),
        ];
        let output = self.output(&args)?;
        check("gh", &args, &output)
    }
}

/// URL GitHub offers for opening a PR from a freshly pushed branch.
pub fn new_pull_request_url(host: &str, repo: &RepoRef, branch: &str) -> String {
    format!("https://{}/{}/pull/new/{}", host, repo, branch)
}

/// Extracts a PR URL from `gh` output.
///
/// Looks for `https://<host>/<owner>/<repo>/pull/<number>`, last line first.
pub fn extract_pr_url(output: &str, host: &str) -> Option<String> {
    let prefix = format!("https://{}/", host);

    for line in output.lines().rev() {
        let line = line.trim();
        if line.starts_with(&prefix) && line.contains("/pull/") {
            return Some(line.to_string());
        }
    }

    // Also check for PR URLs that might be embedded in text
    for word in output.split_whitespace().rev() {
        if word.starts_with(&prefix) && word.contains("/pull/") {
            let url = word.trim_end_matches(|c: char| !c.is_alphanumeric());
            return Some(url.to_string());
        }
    }

    None
}
