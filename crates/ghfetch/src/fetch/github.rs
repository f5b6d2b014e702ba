//! GitHub REST API fetcher.
//!
//! Talks to the public REST API (or any compatible base URL) and maps the wire
//! payloads into `ghfetch_core::github` types.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT},
    Client, Response, StatusCode, Url,
};
use serde::Deserialize;

use ghfetch_core::fetch::{
    CommitListOptions, FetchError, Fetcher, ListOptions, RepositoryListOptions, Result,
};
use ghfetch_core::github::{Commit, Repository};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GHFETCH_USER_AGENT: &str = concat!("ghfetch/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`GitHubFetcher`].
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base URL. May carry a path prefix, as GitHub Enterprise does.
    pub base_url: String,
    /// Optional personal access token sent as a bearer token.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Errors building the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum GitHubClientError {
    #[error("Invalid GitHub token: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),
    #[error("Invalid GitHub API URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// [`Fetcher`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubFetcher {
    client: Client,
    base_url: Url,
}

impl GitHubFetcher {
    pub fn new(config: &GitHubConfig) -> std::result::Result<Self, GitHubClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(GHFETCH_USER_AGENT));

        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| GitHubClientError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubClientError::InvalidBaseUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    ///
    /// A caller-supplied name can never add path segments or a query.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Always Ok: bases that cannot carry a path are rejected in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(segments);
        tracing::trace!(url = %url, "GitHub request");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        let response = check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl Fetcher for GitHubFetcher {
    async fn list_repositories(
        &self,
        username: &str,
        options: &RepositoryListOptions,
    ) -> Result<Vec<Repository>> {
        let mut query = vec![("type", options.kind.as_str().to_string())];
        query.extend(page_query(&options.page));

        let wire: Vec<WireRepository> = self
            .get(&["users", username, "repos"], &query)
            .await?;

        Ok(wire.into_iter().map(Repository::from).collect())
    }

    async fn list_commits(
        &self,
        username: &str,
        repository: &str,
        options: &CommitListOptions,
    ) -> Result<Vec<Commit>> {
        let wire: Vec<WireCommit> = self
            .get(
                &["repos", username, repository, "commits"],
                &page_query(&options.page),
            )
            .await?;

        Ok(wire.into_iter().map(Commit::from).collect())
    }
}

fn page_query(page: &ListOptions) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.page.to_string()),
        ("per_page", page.per_page.to_string()),
    ]
}

async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(status_to_error(status, url, body))
}

fn status_to_error(status: StatusCode, url: String, body: String) -> FetchError {
    if status == StatusCode::NOT_FOUND {
        return FetchError::NotFound(url);
    }

    let message = match serde_json::from_str::<WireError>(&body) {
        Ok(err) => err.message,
        Err(_) if body.is_empty() => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) => body,
    };

    FetchError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WireAccount {
    #[serde(default)]
    login: Option<String>,
}

fn login(account: Option<WireAccount>) -> String {
    account.and_then(|a| a.login).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct WireRepository {
    id: i64,
    #[serde(default)]
    node_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    owner: Option<WireAccount>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<WireRepository> for Repository {
    fn from(wire: WireRepository) -> Self {
        Repository::new(
            wire.id,
            wire.node_id.unwrap_or_default(),
            login(wire.owner),
            wire.name.unwrap_or_default(),
            wire.created_at.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct WireCommit {
    sha: String,
    #[serde(default)]
    node_id: Option<String>,
    #[serde(default)]
    author: Option<WireAccount>,
    #[serde(default)]
    comments_url: Option<String>,
}

impl From<WireCommit> for Commit {
    fn from(wire: WireCommit) -> Self {
        Commit::new(
            wire.sha,
            wire.node_id.unwrap_or_default(),
            login(wire.author),
            wire.comments_url.unwrap_or_default(),
        )
    }
}
