//! Remote URL parsing and fork detection.

use regex::Regex;
use tracing::debug;

use crate::error::{AcpError, Result};
use crate::git::Git;

use super::types::{ForkContext, RepoRef};

/// Parse an SSH or HTTPS remote URL on `host` into a [`RepoRef`].
///
/// Accepted forms:
/// - `git@<host>:owner/repo.git`
/// - `https://<host>/owner/repo.git` (userinfo such as a token is allowed)
///
/// The `.git` suffix is optional. Anything else, including other hosts,
/// yields `None`.
pub fn parse_remote_url(url: &str, host: &str) -> Option<RepoRef> {
    let url = url.trim();
    let host = regex::escape(host);
    let patterns = [
        format!(r"^git@{host}:([^/\s]+)/([^/\s]+?)(?:\.git)?/?$"),
        format!(r"^https://(?:[^@/\s]+@)?{host}/([^/\s]+)/([^/\s]+?)(?:\.git)?/?$"),
    ];

    patterns.iter().find_map(|pattern| {
        let re = Regex::new(pattern).ok()?;
        let caps = re.captures(url)?;
        Some(RepoRef::new(&caps[1], &caps[2]))
    })
}

/// Work out which repository receives the PR.
///
/// `origin` is required. An `upstream` remote turns the checkout into a
/// fork; if `upstream` exists but cannot be parsed the configuration is
/// ambiguous and resolution fails.
pub fn resolve_fork_context(git: &Git<'_>, host: &str) -> Result<ForkContext> {
    let origin_url = git.remote_url("origin")?.ok_or(AcpError::NoOriginRemote)?;
    let fork_repo = parse_remote_url(&origin_url, host).ok_or_else(|| AcpError::UnsupportedRemote {
        remote: "origin".to_string(),
        url: origin_url.clone(),
        host: host.to_string(),
    })?;

    let Some(upstream_url) = git.remote_url("upstream")? else {
        debug!(repo = %fork_repo, "no upstream remote, treating as non-fork");
        return Ok(ForkContext::single(fork_repo));
    };

    let upstream_repo =
        parse_remote_url(&upstream_url, host).ok_or_else(|| AcpError::UnsupportedRemote {
            remote: "upstream".to_string(),
            url: upstream_url.clone(),
            host: host.to_string(),
        })?;

    debug!(fork = %fork_repo, upstream = %upstream_repo, "detected fork");

    Ok(ForkContext {
        fork_repo,
        upstream_repo,
        is_fork: true,
    })
}
