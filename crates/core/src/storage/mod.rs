mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use http_mapping::store_error_to_status_code;
pub use traits::RepositoryStore;
pub use types::{SortDirection, SortField, TOP_REPOSITORIES_LIMIT};
