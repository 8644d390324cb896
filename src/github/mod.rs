pub mod client;
pub mod fetcher;
pub mod issues;

pub use client::GitHubApiClient;
pub use fetcher::{FetchError, GitHubFetcher};
