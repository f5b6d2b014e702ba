use serde::{Deserialize, Serialize};

/// Number of repositories returned by the recently-accessed ranking.
pub const TOP_REPOSITORIES_LIMIT: usize = 20;

/// Sort direction for ordered repository queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Repository attribute a query can be ordered by.
///
/// A closed set so that order clauses are never built from caller text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    LastAccess,
    CreatedAt,
    Name,
    Id,
}

impl SortField {
    /// Column name in the repositories table.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::LastAccess => "last_access",
            SortField::CreatedAt => "created_at",
            SortField::Name => "name",
            SortField::Id => "id",
        }
    }
}
