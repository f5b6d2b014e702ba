//! Cache backend implementations.
//!
//! Concrete implementations of the `Cache` trait defined in
//! `ghfetch_core::cache`. Only the in-memory backend exists; the listing cache
//! is process local and rebuilt from upstream on restart.

pub mod memory;

pub use memory::ExpiringCache;
