use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use ghfetch_core::fetch::FetchError;
use ghfetch_core::storage::store_error_to_status_code;

use crate::relay::RelayError;

/// Handler error rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError(pub RelayError);

/// Maps a relay error to the HTTP status returned to clients.
pub fn relay_error_to_status_code(err: &RelayError) -> StatusCode {
    match err {
        RelayError::EmptyUsername
        | RelayError::EmptyRepository
        | RelayError::InvalidUsername(_)
        | RelayError::InvalidRepository(_) => StatusCode::BAD_REQUEST,
        RelayError::Upstream(FetchError::NotFound(_)) => StatusCode::NOT_FOUND,
        RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        RelayError::Fallback { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        RelayError::Store(store_err) => StatusCode::from_u16(store_error_to_status_code(store_err))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = relay_error_to_status_code(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "Request failed");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<RelayError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
