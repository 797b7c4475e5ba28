//! Core types for GitHub PR operations.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::AcpError;

/// An `owner/name` repository identifier parsed from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Where the temp branch lives and where the PR goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkContext {
    /// Repository behind `origin`; the temp branch is pushed here
    pub fork_repo: RepoRef,
    /// PR target; equals `fork_repo` when there is no `upstream` remote
    pub upstream_repo: RepoRef,
    pub is_fork: bool,
}

impl ForkContext {
    /// Context for a repository without an `upstream` remote.
    pub fn single(repo: RepoRef) -> Self {
        Self {
            upstream_repo: repo.clone(),
            fork_repo: repo,
            is_fork: false,
        }
    }

    /// Value for `gh pr create --head`: `owner:branch` for forks.
    pub fn head_ref(&self, branch: &str) -> String {
        if self.is_fork {
            format!("{}:{}", self.fork_repo.owner, branch)
        } else {
            branch.to_string()
        }
    }
}

/// A pull request created by the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestResult {
    pub url: String,
}

/// Strategy passed to `gh pr merge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    Merge,
    #[default]
    Squash,
    Rebase,
}

impl MergeMethod {
    pub const ALL: [MergeMethod; 3] = [MergeMethod::Merge, MergeMethod::Squash, MergeMethod::Rebase];

    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMethod::Merge => "merge",
            MergeMethod::Squash => "squash",
            MergeMethod::Rebase => "rebase",
        }
    }

    /// The `gh pr merge` flag selecting this method.
    pub fn gh_flag(&self) -> &'static str {
        match self {
            MergeMethod::Merge => "--merge",
            MergeMethod::Squash => "--squash",
            MergeMethod::Rebase => "--rebase",
        }
    }
}

impl fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeMethod {
    type Err = AcpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MergeMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AcpError::InvalidMergeMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_display() {
        assert_eq!(RepoRef::new("user", "repo").to_string(), "user/repo");
    }

    #[test]
    fn test_single_context_is_not_a_fork() {
        let ctx = ForkContext::single(RepoRef::new("user", "repo"));
        assert!(!ctx.is_fork);
        assert_eq!(ctx.fork_repo, ctx.upstream_repo);
    }

    #[test]
    fn test_head_ref_bare_for_non_fork() {
        let ctx = ForkContext::single(RepoRef::new("user", "repo"));
        assert_eq!(ctx.head_ref("acp/user/1234"), "acp/user/1234");
    }

    #[test]
    fn test_head_ref_qualified_for_fork() {
        let ctx = ForkContext {
            fork_repo: RepoRef::new("fork-owner", "repo"),
            upstream_repo: RepoRef::new("upstream", "repo"),
            is_fork: true,
        };
        assert_eq!(ctx.head_ref("acp/me/1234"), "fork-owner:acp/me/1234");
    }

    #[test]
    fn test_merge_method_parse() {
        assert_eq!("merge".parse::<MergeMethod>().unwrap(), MergeMethod::Merge);
        assert_eq!("squash".parse::<MergeMethod>().unwrap(), MergeMethod::Squash);
        assert_eq!("rebase".parse::<MergeMethod>().unwrap(), MergeMethod::Rebase);
    }

    #[test]
    fn test_merge_method_rejects_unknown() {
        let err = "fast-forward".parse::<MergeMethod>().unwrap_err();
        assert!(matches!(err, AcpError::InvalidMergeMethod(ref m) if m == "fast-forward"));
        assert!("Squash".parse::<MergeMethod>().is_err());
    }

    #[test]
    fn test_merge_method_default_is_squash() {
        assert_eq!(MergeMethod::default(), MergeMethod::Squash);
        assert_eq!(MergeMethod::default().gh_flag(), "--squash");
    }
}
