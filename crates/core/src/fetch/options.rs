use serde::{Deserialize, Serialize};

/// Default page requested from the upstream.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size requested from the upstream.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Page selection shared by every listing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    pub page: u32,
    pub per_page: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl ListOptions {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Parses raw query values, falling back to the defaults for anything
    /// missing or non-numeric.
    pub fn from_query(page: Option<&str>, per_page: Option<&str>) -> Self {
        Self {
            page: parse_or(page, DEFAULT_PAGE),
            per_page: parse_or(per_page, DEFAULT_PER_PAGE),
        }
    }
}

fn parse_or(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Which of a user's repositories to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    All,
    #[default]
    Public,
    Owner,
    Member,
}

impl RepositoryKind {
    /// Query parameter value understood by the GitHub API.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryKind::All => "all",
            RepositoryKind::Public => "public",
            RepositoryKind::Owner => "owner",
            RepositoryKind::Member => "member",
        }
    }
}

/// Options for listing a user's repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepositoryListOptions {
    pub kind: RepositoryKind,
    pub page: ListOptions,
}

impl RepositoryListOptions {
    /// Public repositories on the given page.
    pub fn public(page: ListOptions) -> Self {
        Self {
            kind: RepositoryKind::Public,
            page,
        }
    }
}

/// Options for listing a repository's commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitListOptions {
    pub page: ListOptions,
}

impl CommitListOptions {
    pub fn new(page: ListOptions) -> Self {
        Self { page }
    }
}
