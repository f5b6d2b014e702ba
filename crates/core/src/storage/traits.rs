use async_trait::async_trait;

use crate::github::Repository;

use super::{Result, SortDirection, SortField};

/// Durable store for repositories, used for fallback reads and ranking.
#[async_trait]
pub trait RepositoryStore: Send + Sync {
    /// Gets a repository by its ID.
    async fn get_repository(&self, id: i64) -> Result<Option<Repository>>;

    /// Gets every stored repository owned by a user.
    async fn get_repositories(&self, username: &str) -> Result<Vec<Repository>>;

    /// Upserts a batch of repositories.
    ///
    /// Existing IDs only get their `last_access` bumped to now; new IDs are
    /// inserted with `last_access` = now. The batch applies all-or-nothing.
    /// Returns the batch with `last_access` set.
    async fn create_repositories(&self, repositories: &[Repository]) -> Result<Vec<Repository>>;

    /// Gets up to `limit` repositories of a user ordered by `field`.
    async fn get_repositories_ordered_by(
        &self,
        username: &str,
        limit: usize,
        direction: SortDirection,
        field: SortField,
    ) -> Result<Vec<Repository>>;
}
