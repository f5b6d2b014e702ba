mod types;

pub use types::{Commit, Repository};
