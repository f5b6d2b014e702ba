//! SQLite schema and SQL query constants.

/// Creates the repositories table and its indexes.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS repositories (
    id INTEGER PRIMARY KEY,
    node_id TEXT NOT NULL,
    owner TEXT NOT NULL,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    last_access TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_repositories_owner ON repositories(owner);
CREATE INDEX IF NOT EXISTS idx_repositories_owner_last_access ON repositories(owner, last_access);
"#;

/// Inserts a repository, or only bumps `last_access` if the ID exists.
pub const UPSERT_REPOSITORY: &str = r#"
INSERT INTO repositories (id, node_id, owner, name, created_at, last_access)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT(id) DO UPDATE SET last_access = excluded.last_access
"#;

pub const SELECT_REPOSITORY_BY_ID: &str = r#"
SELECT id, node_id, owner, name, created_at, last_access
FROM repositories
WHERE id = ?1
"#;

pub const SELECT_REPOSITORIES_BY_OWNER: &str = r#"
SELECT id, node_id, owner, name, created_at, last_access
FROM repositories
WHERE owner = ?1
ORDER BY id
"#;

/// Builds the ordered-by query. Column and direction come from closed enums.
pub fn select_repositories_ordered_by(column: &str, direction: &str) -> String {
    format!(
        "SELECT id, node_id, owner, name, created_at, last_access \
         FROM repositories \
         WHERE owner = ?1 \
         ORDER BY {column} {direction}, id {direction} \
         LIMIT ?2"
    )
}
