//! Upstream fetcher implementations.

mod github;

pub use github::{GitHubConfig, GitHubFetcher, DEFAULT_GITHUB_API_URL};
