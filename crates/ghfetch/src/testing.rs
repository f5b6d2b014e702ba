//! Test doubles shared by the relay, handler and router tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use ghfetch_core::fetch::{self, CommitListOptions, FetchError, Fetcher, RepositoryListOptions};
use ghfetch_core::github::{Commit, Repository};
use ghfetch_core::storage::{self, RepositoryStore, SortDirection, SortField, StoreError};

use crate::storage::InMemoryStore;

pub fn repository(id: i64, owner: &str, name: &str) -> Repository {
    Repository::new(
        id,
        format!("node-{id}"),
        owner,
        name,
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
    )
}

pub fn commit(sha: &str, author: &str) -> Commit {
    Commit::new(
        sha,
        format!("node-{sha}"),
        author,
        format!("https://api.github.test/commits/{sha}/comments"),
    )
}

/// Fetcher returning canned listings, or a fixed error when one is set.
pub struct MockFetcher {
    repositories: Vec<Repository>,
    commits: Vec<Commit>,
    error: Mutex<Option<FetchError>>,
    pub repository_calls: AtomicUsize,
    pub commit_calls: AtomicUsize,
    pub last_repository_options: Mutex<Option<RepositoryListOptions>>,
}

impl MockFetcher {
    pub fn new(repositories: Vec<Repository>, commits: Vec<Commit>) -> Self {
        Self {
            repositories,
            commits,
            error: Mutex::new(None),
            repository_calls: AtomicUsize::new(0),
            commit_calls: AtomicUsize::new(0),
            last_repository_options: Mutex::new(None),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        let fetcher = Self::new(Vec::new(), Vec::new());
        fetcher.fail_with(Some(error));
        fetcher
    }

    pub fn fail_with(&self, error: Option<FetchError>) {
        *self.error.lock().unwrap() = error;
    }

    pub fn repository_calls(&self) -> usize {
        self.repository_calls.load(Ordering::SeqCst)
    }

    pub fn commit_calls(&self) -> usize {
        self.commit_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> fetch::Result<()> {
        match self.error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn list_repositories(
        &self,
        _username: &str,
        options: &RepositoryListOptions,
    ) -> fetch::Result<Vec<Repository>> {
        self.repository_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_repository_options.lock().unwrap() = Some(*options);
        self.check()?;
        Ok(self.repositories.clone())
    }

    async fn list_commits(
        &self,
        _username: &str,
        _repository: &str,
        _options: &CommitListOptions,
    ) -> fetch::Result<Vec<Commit>> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.commits.clone())
    }
}

/// In-memory store with call counters and switchable read/write failures.
#[derive(Default)]
pub struct MockStore {
    inner: InMemoryStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub read_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
    pub ranking_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, repositories: &[Repository]) {
        self.inner.create_repositories(repositories).await.unwrap();
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn ranking_calls(&self) -> usize {
        self.ranking_calls.load(Ordering::SeqCst)
    }

    fn check_reads(&self) -> storage::Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::ConnectionFailed("database unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RepositoryStore for MockStore {
    async fn get_repository(&self, id: i64) -> storage::Result<Option<Repository>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        self.inner.get_repository(id).await
    }

    async fn get_repositories(&self, username: &str) -> storage::Result<Vec<Repository>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        self.inner.get_repositories(username).await
    }

    async fn create_repositories(
        &self,
        repositories: &[Repository],
    ) -> storage::Result<Vec<Repository>> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed("disk full".to_string()));
        }
        self.inner.create_repositories(repositories).await
    }

    async fn get_repositories_ordered_by(
        &self,
        username: &str,
        limit: usize,
        direction: SortDirection,
        field: SortField,
    ) -> storage::Result<Vec<Repository>> {
        self.ranking_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        self.inner
            .get_repositories_ordered_by(username, limit, direction, field)
            .await
    }
}
