//! Health check endpoints.
//!
//! - `/livez` - Liveness probe (immediate 200, no checks)
//! - `/healthz` - Status plus the number of resident cache entries

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub cache_entries: usize,
}

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Service status and cache size.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        cache_entries: state.orchestrator.cache_entries().await,
    })
}
