//! In-memory cache backend with sliding expiration and a periodic sweep.

mod cache;

pub use cache::ExpiringCache;
