//! In-memory storage backend.
//!
//! Keeps repositories in a `HashMap` behind `Arc<RwLock<_>>`. Used when the
//! `sqlite` feature is off and as the store in tests. Data is lost on restart.

mod repository;

pub use repository::InMemoryStore;
