//! Shared application state.
//!
//! Holds the fetch orchestrator and the listing cache behind `Arc` so that
//! every request handler shares one cache, one store and one persist worker.
//! The store backend is chosen at compile time via the `sqlite` feature.

use std::sync::Arc;

use ghfetch_core::cache::CachedListing;
use ghfetch_core::fetch::Fetcher;
use ghfetch_core::storage::RepositoryStore;

use crate::cache::ExpiringCache;
use crate::config::Config;
use crate::fetch::GitHubFetcher;
use crate::relay::FetchOrchestrator;

/// Shared application state, cloned into each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside orchestration over fetcher, cache and store.
    pub orchestrator: Arc<FetchOrchestrator>,
    /// Listing cache; kept here to stop its sweep task on shutdown.
    cache: Arc<ExpiringCache<CachedListing>>,
}

impl AppState {
    /// Wires the cache and orchestrator around the given collaborators.
    pub fn build(
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn RepositoryStore>,
        config: &Config,
    ) -> Self {
        let cache = Arc::new(ExpiringCache::new(
            config.cache_capacity,
            config.cache_ttl_seconds,
        ));
        let orchestrator = Arc::new(FetchOrchestrator::new(
            fetcher,
            store,
            cache.clone(),
            config.persist_queue_capacity,
        ));

        Self {
            orchestrator,
            cache,
        }
    }

    /// Flushes queued persistence, then stops the cache sweep.
    pub async fn shutdown(&self) {
        self.orchestrator.shutdown().await;
        self.cache.shutdown().await;
        tracing::debug!("Background tasks stopped");
    }
}

#[cfg(feature = "sqlite")]
mod sqlite_store {
    use super::*;
    use crate::storage::SqliteStore;

    impl AppState {
        /// Creates AppState with the GitHub fetcher and SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let fetcher = Arc::new(GitHubFetcher::new(&config.github())?);
            let store = Arc::new(SqliteStore::new(&config.sqlite_path).await?);

            tracing::info!(path = %config.sqlite_path, "Using SQLite store");

            Ok(Self::build(fetcher, store, config))
        }
    }
}

#[cfg(not(feature = "sqlite"))]
mod inmemory_store {
    use super::*;
    use crate::storage::InMemoryStore;

    impl AppState {
        /// Creates AppState with the GitHub fetcher and in-memory storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let fetcher = Arc::new(GitHubFetcher::new(&config.github())?);
            let store = Arc::new(InMemoryStore::new());

            tracing::info!("Using in-memory store");

            Ok(Self::build(fetcher, store, config))
        }
    }
}
