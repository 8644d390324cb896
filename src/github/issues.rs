use crate::issue::Issue;
use crate::repository::Repository;
use serde::Deserialize;

/// Decodes the `/repos/{owner}/{repo}/issues` payload.
///
/// Pull requests share the endpoint and are dropped. Entries that fail to
/// decode are skipped rather than failing the whole page.
pub fn parse_github_issues(issues_json: &[serde_json::Value]) -> Vec<Issue> {
    issues_json
        .iter()
        .filter(|issue| issue["pull_request"].is_null())
        .filter_map(|issue| match Issue::deserialize(issue) {
            Ok(issue) => Some(issue),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed issue");
                None
            }
        })
        .collect()
}

/// Decodes the `/users/{username}/repos` payload, skipping malformed entries.
pub fn parse_github_repositories(repos_json: &[serde_json::Value]) -> Vec<Repository> {
    repos_json
        .iter()
        .filter_map(|repo| match Repository::deserialize(repo) {
            Ok(repo) => Some(repo),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed repository");
                None
            }
        })
        .collect()
}
