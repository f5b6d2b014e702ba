use serde::{Deserialize, Serialize};

use crate::github::{Commit, Repository};

/// Value stored in the listing cache, tagged by resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum CachedListing {
    Repositories(Vec<Repository>),
    Commits(Vec<Commit>),
}

impl CachedListing {
    /// Borrows the repositories, or `None` if this is another kind.
    pub fn as_repositories(&self) -> Option<&[Repository]> {
        match self {
            CachedListing::Repositories(repos) => Some(repos.as_slice()),
            _ => None,
        }
    }

    /// Borrows the commits, or `None` if this is another kind.
    pub fn as_commits(&self) -> Option<&[Commit]> {
        match self {
            CachedListing::Commits(commits) => Some(commits.as_slice()),
            _ => None,
        }
    }

    pub fn into_repositories(self) -> Option<Vec<Repository>> {
        match self {
            CachedListing::Repositories(repos) => Some(repos),
            _ => None,
        }
    }

    pub fn into_commits(self) -> Option<Vec<Commit>> {
        match self {
            CachedListing::Commits(commits) => Some(commits),
            _ => None,
        }
    }

    /// Number of items in the listing.
    pub fn len(&self) -> usize {
        match self {
            CachedListing::Repositories(repos) => repos.len(),
            CachedListing::Commits(commits) => commits.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Repository>> for CachedListing {
    fn from(repos: Vec<Repository>) -> Self {
        CachedListing::Repositories(repos)
    }
}

impl From<Vec<Commit>> for CachedListing {
    fn from(commits: Vec<Commit>) -> Self {
        CachedListing::Commits(commits)
    }
}
