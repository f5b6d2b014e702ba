use thiserror::Error;

use ghfetch_core::fetch::FetchError;
use ghfetch_core::storage::StoreError;

/// Errors returned by the fetch orchestrator.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Username must not be empty")]
    EmptyUsername,
    #[error("Repository name must not be empty")]
    EmptyRepository,
    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),
    #[error("Invalid repository name: {0:?}")]
    InvalidRepository(String),
    #[error(transparent)]
    Upstream(#[from] FetchError),
    /// The upstream failed and so did the durable fallback. Both causes are kept.
    #[error("{fetch} (fallback read failed: {store})")]
    Fallback { fetch: FetchError, store: StoreError },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        assert_eq!(
            RelayError::EmptyUsername.to_string(),
            "Username must not be empty"
        );
        assert_eq!(
            RelayError::EmptyRepository.to_string(),
            "Repository name must not be empty"
        );
        assert_eq!(
            RelayError::InvalidUsername("a/b".to_string()).to_string(),
            r#"Invalid username: "a/b""#
        );
    }

    #[test]
    fn test_upstream_is_transparent() {
        let err = RelayError::from(FetchError::NotFound("ghost".to_string()));

        assert_eq!(err.to_string(), "Upstream resource not found: ghost");
    }

    #[test]
    fn test_fallback_display_keeps_both_causes() {
        let err = RelayError::Fallback {
            fetch: FetchError::Unreachable("timeout".to_string()),
            store: StoreError::ConnectionFailed("locked".to_string()),
        };

        let message = err.to_string();
        assert!(message.contains("timeout"));
        assert!(message.contains("locked"));
    }
}
