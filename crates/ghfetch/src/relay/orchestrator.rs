//! Cache-aside orchestration over the fetcher and the durable store.
//!
//! Reads go cache first, then upstream. Successful repository fetches are
//! cached and queued for persistence; when the upstream fails the durable
//! store serves the last known snapshot instead. Commits have no fallback.

use std::sync::Arc;

use ghfetch_core::cache::{commits_key, repositories_key, Cache, CachedListing};
use ghfetch_core::fetch::{CommitListOptions, Fetcher, RepositoryListOptions};
use ghfetch_core::github::{Commit, Repository};
use ghfetch_core::storage::{RepositoryStore, SortDirection, SortField, TOP_REPOSITORIES_LIMIT};

use super::error::{RelayError, Result};
use super::persist::PersistQueue;

/// Coordinates the listing cache, the upstream fetcher and the durable store.
pub struct FetchOrchestrator {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn RepositoryStore>,
    cache: Arc<dyn Cache<CachedListing>>,
    persist: PersistQueue,
}

impl FetchOrchestrator {
    /// Creates an orchestrator and starts its persist worker.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Upstream source of listings
    /// * `store` - Durable store used for write-back, fallback and ranking
    /// * `cache` - Listing cache shared across requests
    /// * `persist_capacity` - Number of batches the persist queue holds
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn RepositoryStore>,
        cache: Arc<dyn Cache<CachedListing>>,
        persist_capacity: usize,
    ) -> Self {
        let persist = PersistQueue::new(Arc::clone(&store), persist_capacity);

        Self {
            fetcher,
            store,
            cache,
            persist,
        }
    }

    /// Lists a user's repositories.
    ///
    /// The cache key is the username alone, so any cached page answers a
    /// request for any other page until the entry expires.
    pub async fn list_repositories(
        &self,
        username: &str,
        options: &RepositoryListOptions,
    ) -> Result<Vec<Repository>> {
        validate_username(username)?;
        let key = repositories_key(username);

        if let Some(repos) = self
            .cache
            .get(&key)
            .await
            .and_then(CachedListing::into_repositories)
        {
            tracing::trace!(username, "Cache hit for repositories");
            return Ok(repos);
        }
        tracing::trace!(username, "Cache miss for repositories");

        let fetch_err = match self.fetcher.list_repositories(username, options).await {
            Ok(repos) => {
                self.cache
                    .put(&key, CachedListing::from(repos.clone()))
                    .await;
                self.persist.enqueue(repos.clone());
                return Ok(repos);
            }
            Err(err) => err,
        };

        tracing::warn!(username, error = %fetch_err, "Upstream fetch failed, reading from store");

        match self.store.get_repositories(username).await {
            Ok(repos) => Ok(repos),
            Err(store_err) => {
                tracing::error!(
                    username,
                    fetch_error = %fetch_err,
                    store_error = %store_err,
                    "Fallback read failed"
                );
                Err(RelayError::Fallback {
                    fetch: fetch_err,
                    store: store_err,
                })
            }
        }
    }

    /// Lists commits of one repository. Upstream failures are returned as is.
    pub async fn list_commits(
        &self,
        username: &str,
        repository: &str,
        options: &CommitListOptions,
    ) -> Result<Vec<Commit>> {
        validate_username(username)?;
        validate_repository(repository)?;
        let key = commits_key(username, repository);

        if let Some(commits) = self
            .cache
            .get(&key)
            .await
            .and_then(CachedListing::into_commits)
        {
            tracing::trace!(username, repository, "Cache hit for commits");
            return Ok(commits);
        }
        tracing::trace!(username, repository, "Cache miss for commits");

        let commits = self
            .fetcher
            .list_commits(username, repository, options)
            .await
            .inspect_err(|err| {
                tracing::warn!(username, repository, error = %err, "Upstream commit fetch failed")
            })?;

        self.cache
            .put(&key, CachedListing::from(commits.clone()))
            .await;

        Ok(commits)
    }

    /// The user's most recently accessed repositories, straight from the store.
    pub async fn top_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        validate_username(username)?;

        let repos = self
            .store
            .get_repositories_ordered_by(
                username,
                TOP_REPOSITORIES_LIMIT,
                SortDirection::Desc,
                SortField::LastAccess,
            )
            .await?;

        Ok(repos)
    }

    /// Number of entries in the listing cache.
    pub async fn cache_entries(&self) -> usize {
        self.cache.len().await
    }

    /// Flushes pending persistence and stops the persist worker.
    pub async fn shutdown(&self) {
        self.persist.shutdown().await;
    }
}

fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(RelayError::EmptyUsername);
    }
    if !is_single_segment(username) {
        return Err(RelayError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

fn validate_repository(repository: &str) -> Result<()> {
    if repository.trim().is_empty() {
        return Err(RelayError::EmptyRepository);
    }
    if !is_single_segment(repository) {
        return Err(RelayError::InvalidRepository(repository.to_string()));
    }
    Ok(())
}

/// Names end up as one upstream path segment and as cache keys, so they may
/// not contain separators or be a dot segment.
fn is_single_segment(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".."
}
