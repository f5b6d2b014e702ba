//! SQLite repository store.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use tokio_rusqlite::Connection;

use ghfetch_core::github::Repository;
use ghfetch_core::storage::{RepositoryStore, Result, SortDirection, SortField, StoreError};

use super::conversions::{format_datetime, row_to_repository};
use super::error::map_tokio_rusqlite_error;
use super::schema;

const ENTITY: &str = "Repository";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Durable [`RepositoryStore`] on a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a file-backed database and applies the schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a store on an in-memory database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl RepositoryStore for SqliteStore {
    async fn get_repository(&self, id: i64) -> Result<Option<Repository>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_REPOSITORY_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_repository) {
                    Ok(repo) => Ok(Some(repo)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }

    async fn get_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        let owner = username.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_REPOSITORIES_BY_OWNER)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&owner], row_to_repository)
                    .map_err(wrap_err)?;

                let mut repos = Vec::new();
                for row_result in rows {
                    repos.push(row_result.map_err(wrap_err)?);
                }
                Ok(repos)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }

    async fn create_repositories(&self, repositories: &[Repository]) -> Result<Vec<Repository>> {
        if repositories.is_empty() {
            return Ok(Vec::new());
        }

        // Stored at microsecond precision; truncate so the returned batch matches.
        let now = Utc::now().trunc_subsecs(6);
        let batch: Vec<Repository> = repositories
            .iter()
            .cloned()
            .map(|repo| repo.with_last_access(now))
            .collect();
        let last_access = format_datetime(&now);

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                {
                    let mut upsert = tx.prepare(schema::UPSERT_REPOSITORY).map_err(wrap_err)?;
                    for repo in &batch {
                        upsert
                            .execute(rusqlite::params![
                                repo.id,
                                repo.node_id,
                                repo.owner,
                                repo.name,
                                format_datetime(&repo.created_at),
                                last_access,
                            ])
                            .map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(batch)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }

    async fn get_repositories_ordered_by(
        &self,
        username: &str,
        limit: usize,
        direction: SortDirection,
        field: SortField,
    ) -> Result<Vec<Repository>> {
        let owner = username.to_string();
        let sql = schema::select_repositories_ordered_by(field.column(), direction.as_sql());
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params![owner, limit], row_to_repository)
                    .map_err(wrap_err)?;

                let mut repos = Vec::new();
                for row_result in rows {
                    repos.push(row_result.map_err(wrap_err)?);
                }
                Ok(repos)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn repo(id: i64, owner: &str, name: &str) -> Repository {
        Repository::new(
            id,
            format!("node-{id}"),
            owner,
            name,
            Utc.with_ymd_and_hms(2020, 1, id as u32, 0, 0, 0).unwrap(),
        )
    }

    async fn store() -> SqliteStore {
        SqliteStore::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_sets_last_access() {
        let store = store().await;
        let before = Utc::now();

        let saved = store
            .create_repositories(&[repo(1, "octocat", "blog")])
            .await
            .unwrap();

        assert_eq!(saved.len(), 1);
        let last_access = saved[0].last_access.unwrap();
        assert!(last_access >= before - chrono::Duration::milliseconds(1));

        let fetched = store.get_repository(1).await.unwrap().unwrap();
        assert_eq!(fetched, saved[0]);
    }

    #[tokio::test]
    async fn test_get_nonexistent_repository() {
        let store = store().await;

        assert!(store.get_repository(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_only_bumps_last_access() {
        let store = store().await;
        store
            .create_repositories(&[repo(1, "octocat", "blog")])
            .await
            .unwrap();
        let first = store.get_repository(1).await.unwrap().unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let mut changed = repo(1, "someone-else", "renamed");
        changed.created_at = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let saved = store.create_repositories(&[changed.clone()]).await.unwrap();

        let second = store.get_repository(1).await.unwrap().unwrap();
        assert_eq!(saved[0].name, "renamed");
        assert_eq!(saved[0].owner, "someone-else");
        assert_eq!(saved[0].created_at, changed.created_at);
        assert_eq!(saved[0].last_access, second.last_access);
        assert_eq!(second.name, "blog");
        assert_eq!(second.owner, "octocat");
        assert_eq!(second.node_id, "node-1");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.last_access > first.last_access);
    }

    #[tokio::test]
    async fn test_new_id_in_batch_is_inserted() {
        let store = store().await;
        store
            .create_repositories(&[repo(1, "octocat", "blog")])
            .await
            .unwrap();

        let saved = store
            .create_repositories(&[repo(1, "octocat", "blog"), repo(2, "octocat", "dotfiles")])
            .await
            .unwrap();

        assert_eq!(saved.len(), 2);
        assert!(saved.iter().all(|r| r.last_access.is_some()));
        assert_eq!(store.get_repositories("octocat").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_batch_is_rolled_back() {
        let store = store().await;
        store
            .conn
            .call(|conn| {
                conn.execute_batch(
                    "CREATE TRIGGER reject_second BEFORE INSERT ON repositories
                     WHEN NEW.id = 2
                     BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                )
                .map_err(wrap_err)
            })
            .await
            .unwrap();

        let result = store
            .create_repositories(&[repo(1, "octocat", "blog"), repo(2, "octocat", "dotfiles")])
            .await;

        assert!(result.is_err());
        assert!(store.get_repositories("octocat").await.unwrap().is_empty());
        assert!(store.get_repository(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let store = store().await;

        assert!(store.create_repositories(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_repositories_filters_by_owner() {
        let store = store().await;
        store
            .create_repositories(&[
                repo(2, "octocat", "b"),
                repo(1, "octocat", "a"),
                repo(3, "hubot", "c"),
            ])
            .await
            .unwrap();

        let ids: Vec<i64> = store
            .get_repositories("octocat")
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_ordered_by_last_access_desc_with_limit() {
        let store = store().await;
        for id in 1..=3 {
            store
                .create_repositories(&[repo(id, "octocat", &format!("r{id}"))])
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        store
            .create_repositories(&[repo(1, "octocat", "r1")])
            .await
            .unwrap();

        let top = store
            .get_repositories_ordered_by("octocat", 2, SortDirection::Desc, SortField::LastAccess)
            .await
            .unwrap();

        let ids: Vec<i64> = top.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_ordered_by_created_at_asc() {
        let store = store().await;
        store
            .create_repositories(&[
                repo(3, "octocat", "c"),
                repo(1, "octocat", "a"),
                repo(2, "octocat", "b"),
            ])
            .await
            .unwrap();

        let repos = store
            .get_repositories_ordered_by("octocat", 10, SortDirection::Asc, SortField::CreatedAt)
            .await
            .unwrap();

        let ids: Vec<i64> = repos.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_file_backed_store_persists() {
        let path = std::env::temp_dir().join(format!("ghfetch-test-{}.db", std::process::id()));
        let path_str = path.to_string_lossy().to_string();

        {
            let store = SqliteStore::new(&path_str).await.unwrap();
            store
                .create_repositories(&[repo(1, "octocat", "blog")])
                .await
                .unwrap();
        }

        let reopened = SqliteStore::new(&path_str).await.unwrap();
        assert!(reopened.get_repository(1).await.unwrap().is_some());

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }
}
