use thiserror::Error;

/// Errors raised by a live upstream lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),
    #[error("Upstream rejected the request with {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("Upstream resource not found: {0}")]
    NotFound(String),
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
