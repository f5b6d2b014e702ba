//! In-memory repository store.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use ghfetch_core::github::Repository;
use ghfetch_core::storage::{RepositoryStore, Result, SortDirection, SortField};

/// Non-durable [`RepositoryStore`] keyed by repository ID.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    repositories: Arc<RwLock<HashMap<i64, Repository>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Repository, b: &Repository, field: SortField) -> Ordering {
    match field {
        SortField::LastAccess => a.last_access.cmp(&b.last_access),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Id => a.id.cmp(&b.id),
    }
}

#[async_trait]
impl RepositoryStore for InMemoryStore {
    async fn get_repository(&self, id: i64) -> Result<Option<Repository>> {
        let repositories = self.repositories.read().await;
        Ok(repositories.get(&id).cloned())
    }

    async fn get_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        let repositories = self.repositories.read().await;
        let mut found: Vec<Repository> = repositories
            .values()
            .filter(|r| r.owner == username)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn create_repositories(&self, repositories: &[Repository]) -> Result<Vec<Repository>> {
        let now = Utc::now();
        let mut stored = self.repositories.write().await;

        let saved = repositories
            .iter()
            .map(|incoming| {
                let incoming = incoming.clone().with_last_access(now);
                stored
                    .entry(incoming.id)
                    .and_modify(|existing| existing.last_access = Some(now))
                    .or_insert_with(|| incoming.clone());
                incoming
            })
            .collect();

        Ok(saved)
    }

    async fn get_repositories_ordered_by(
        &self,
        username: &str,
        limit: usize,
        direction: SortDirection,
        field: SortField,
    ) -> Result<Vec<Repository>> {
        let mut found = self.get_repositories(username).await?;

        found.sort_by(|a, b| {
            let ordering = compare(a, b, field).then_with(|| a.id.cmp(&b.id));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        found.truncate(limit);

        Ok(found)
    }
}
