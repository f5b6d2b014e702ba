use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository listed for a GitHub user.
///
/// `id` is the identity. `last_access` is owned by the durable store: records
/// fresh from the upstream carry `None` until they are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub node_id: String,
    pub owner: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_access: Option<DateTime<Utc>>,
}

impl Repository {
    /// Creates a repository that has not been observed by the store yet.
    pub fn new(
        id: i64,
        node_id: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            node_id: node_id.into(),
            owner: owner.into(),
            name: name.into(),
            created_at,
            last_access: None,
        }
    }

    /// Sets the last access timestamp.
    pub fn with_last_access(mut self, last_access: DateTime<Utc>) -> Self {
        self.last_access = Some(last_access);
        self
    }
}

/// A commit listed for a repository. Identity is the SHA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub node_id: String,
    pub author: String,
    pub comments_url: String,
}

impl Commit {
    pub fn new(
        sha: impl Into<String>,
        node_id: impl Into<String>,
        author: impl Into<String>,
        comments_url: impl Into<String>,
    ) -> Self {
        Self {
            sha: sha.into(),
            node_id: node_id.into(),
            author: author.into(),
            comments_url: comments_url.into(),
        }
    }
}
