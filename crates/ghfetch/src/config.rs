use std::{env, time::Duration};

use crate::fetch::{GitHubConfig, DEFAULT_GITHUB_API_URL};
use crate::relay::DEFAULT_PERSIST_QUEUE_CAPACITY;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Idle time in seconds before a cached listing is swept (default: 60)
    pub cache_ttl_seconds: u64,
    /// Initial capacity of the listing cache (default: 100)
    pub cache_capacity: usize,
    /// Path to SQLite database file (default: "ghfetch.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// GitHub API base URL (default: "https://api.github.com")
    pub github_api_url: String,
    /// Optional GitHub token for authenticated requests
    pub github_token: Option<String>,
    /// Upstream request timeout in seconds (default: 10)
    pub github_timeout_seconds: u64,
    /// Batches the persist queue holds before dropping (default: 64)
    pub persist_queue_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache idle TTL in seconds (default: 60)
    /// - `CACHE_CAPACITY` - Initial cache capacity (default: 100)
    /// - `SQLITE_PATH` - SQLite database path (default: "ghfetch.db")
    /// - `GITHUB_API_URL` - GitHub API base URL (default: "https://api.github.com")
    /// - `GITHUB_TOKEN` - GitHub token (optional)
    /// - `GITHUB_TIMEOUT_SECONDS` - Upstream request timeout (default: 10)
    /// - `PERSIST_QUEUE_CAPACITY` - Persist queue size (default: 64)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse().ok());

        Self {
            cache_ttl_seconds: parse("CACHE_TTL_SECONDS").unwrap_or(60),
            cache_capacity: parse("CACHE_CAPACITY").map(|v: u64| v as usize).unwrap_or(100),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "ghfetch.db".to_string()),
            github_api_url: lookup("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            github_token: lookup("GITHUB_TOKEN").filter(|t| !t.trim().is_empty()),
            github_timeout_seconds: parse("GITHUB_TIMEOUT_SECONDS").unwrap_or(10),
            persist_queue_capacity: parse("PERSIST_QUEUE_CAPACITY")
                .map(|v: u64| v as usize)
                .unwrap_or(DEFAULT_PERSIST_QUEUE_CAPACITY),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Connection settings for the GitHub fetcher.
    pub fn github(&self) -> GitHubConfig {
        GitHubConfig {
            base_url: self.github_api_url.clone(),
            token: self.github_token.clone(),
            timeout: Duration::from_secs(self.github_timeout_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]);

        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.sqlite_path, "ghfetch.db");
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.github_token, None);
        assert_eq!(config.github_timeout_seconds, 10);
        assert_eq!(config.persist_queue_capacity, 64);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CACHE_TTL_SECONDS", "5"),
            ("CACHE_CAPACITY", "8"),
            ("SQLITE_PATH", "/tmp/x.db"),
            ("GITHUB_API_URL", "http://localhost:9000"),
            ("GITHUB_TOKEN", "ghp_secret"),
            ("GITHUB_TIMEOUT_SECONDS", "3"),
            ("PERSIST_QUEUE_CAPACITY", "2"),
        ]);

        assert_eq!(config.cache_ttl(), Duration::from_secs(5));
        assert_eq!(config.cache_capacity, 8);
        assert_eq!(config.sqlite_path, "/tmp/x.db");
        assert_eq!(config.persist_queue_capacity, 2);

        let github = config.github();
        assert_eq!(github.base_url, "http://localhost:9000");
        assert_eq!(github.token.as_deref(), Some("ghp_secret"));
        assert_eq!(github.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[("CACHE_TTL_SECONDS", "soon"), ("CACHE_CAPACITY", "-1")]);

        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.cache_capacity, 100);
    }

    #[test]
    fn test_blank_token_is_none() {
        let config = config_from(&[("GITHUB_TOKEN", "  ")]);

        assert_eq!(config.github_token, None);
    }
}
