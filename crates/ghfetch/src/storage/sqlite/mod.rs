//! SQLite storage backend.
//!
//! Implements `RepositoryStore` with `rusqlite`, run off the async runtime via
//! `tokio-rusqlite`.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteStore;
