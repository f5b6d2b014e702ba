//! Core types and traits for ghfetch.
//!
//! Pure domain types, error enums and the collaborator traits (fetcher, store,
//! cache). No I/O lives here.

pub mod cache;
pub mod fetch;
pub mod github;
pub mod storage;
