use super::fetcher::{FetchError, GitHubFetcher};
use super::issues;
use crate::issue::Issue;
use crate::repository::Repository;

const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = "gh-kanban";
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// [`GitHubFetcher`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubApiClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(GitHubApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_list(&self, path: &str) -> Result<Vec<serde_json::Value>, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(response.json::<Vec<serde_json::Value>>().await?)
    }

    pub async fn try_fetch_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<Repository>, FetchError> {
        let repos_json = self.get_list(&format!("/users/{username}/repos")).await?;
        Ok(issues::parse_github_repositories(&repos_json))
    }

    pub async fn try_fetch_issues(&self, repo: &str, owner: &str) -> Result<Vec<Issue>, FetchError> {
        let issues_json = self
            .get_list(&format!("/repos/{owner}/{repo}/issues"))
            .await?;
        Ok(issues::parse_github_issues(&issues_json))
    }
}

impl GitHubFetcher for GitHubApiClient {
    async fn fetch_repositories(&self, username: &str) -> Vec<Repository> {
        self.try_fetch_repositories(username)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, username, "failed to fetch repositories");
                Vec::new()
            })
    }

    async fn fetch_issues(&self, repo: &str, owner: &str) -> Vec<Issue> {
        self.try_fetch_issues(repo, owner)
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, owner, repo, "failed to fetch issues");
                Vec::new()
            })
    }
}
