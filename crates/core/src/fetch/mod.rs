mod error;
mod options;
mod traits;

pub use error::{FetchError, Result};
pub use options::{
    CommitListOptions, ListOptions, RepositoryKind, RepositoryListOptions, DEFAULT_PAGE,
    DEFAULT_PER_PAGE,
};
pub use traits::Fetcher;
