use async_trait::async_trait;

use crate::github::{Commit, Repository};

use super::{CommitListOptions, RepositoryListOptions, Result};

/// Live lookups against the upstream hosting API.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Lists the repositories of a user.
    async fn list_repositories(
        &self,
        username: &str,
        options: &RepositoryListOptions,
    ) -> Result<Vec<Repository>>;

    /// Lists the commits of a user's repository.
    async fn list_commits(
        &self,
        username: &str,
        repository: &str,
        options: &CommitListOptions,
    ) -> Result<Vec<Commit>>;
}
