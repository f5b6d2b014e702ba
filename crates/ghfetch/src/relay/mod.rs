//! Fetch orchestration: cache-aside reads, durable fallback and write-back.

mod error;
mod orchestrator;
mod persist;

pub use error::RelayError;
pub use orchestrator::FetchOrchestrator;
pub use persist::DEFAULT_PERSIST_QUEUE_CAPACITY;
