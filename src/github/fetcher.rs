use crate::issue::Issue;
use crate::repository::Repository;

/// Errors raised by a single GitHub request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API request error: {status} for {url}")]
    Status { status: u16, url: String },
}

/// Remote source of repositories and issues.
///
/// Single attempt, no retry. Any transport or decode failure yields an empty
/// list; implementations log the cause.
#[allow(async_fn_in_trait)]
pub trait GitHubFetcher {
    async fn fetch_repositories(&self, username: &str) -> Vec<Repository>;
    async fn fetch_issues(&self, repo: &str, owner: &str) -> Vec<Issue>;
}
