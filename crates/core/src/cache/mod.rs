mod keys;
mod payload;
mod traits;

pub use keys::{commits_key, repositories_key};
pub use payload::CachedListing;
pub use traits::Cache;
