//! Pure functions for mapping store errors to HTTP status codes.

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use ghfetch_core::storage::{store_error_to_status_code, StoreError};
///
/// let error = StoreError::ConnectionFailed("timeout".to_string());
/// assert_eq!(store_error_to_status_code(&error), 503);
/// ```
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::NotFound { .. } => 404,
        StoreError::ConnectionFailed(_) => 503,
        StoreError::QueryFailed(_) => 500,
        StoreError::Serialization(_) => 500,
        StoreError::InvalidData(_) => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = StoreError::NotFound {
            entity_type: "Repository",
            id: "1".to_string(),
        };
        assert_eq!(store_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = StoreError::ConnectionFailed("refused".to_string());
        assert_eq!(store_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_query_failed_maps_to_500() {
        let error = StoreError::QueryFailed("syntax error".to_string());
        assert_eq!(store_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_serialization_maps_to_500() {
        let error = StoreError::Serialization("bad row".to_string());
        assert_eq!(store_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_invalid_data_maps_to_400() {
        let error = StoreError::InvalidData("bad".to_string());
        assert_eq!(store_error_to_status_code(&error), 400);
    }
}
