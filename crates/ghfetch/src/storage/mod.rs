//! Storage backend implementations.
//!
//! Concrete implementations of `ghfetch_core::storage::RepositoryStore`.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage using `rusqlite` and `tokio-rusqlite`.
//!   Without it the service runs on the in-memory store.
//!
//! The in-memory store is also what the test doubles build on.

#[cfg(any(test, not(feature = "sqlite")))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, not(feature = "sqlite")))]
pub use inmemory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
