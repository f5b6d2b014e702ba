use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        commits::list_commits,
        health::{healthz, livez},
        repositories::list_repositories,
        top::top_repositories,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/user/{username}/repositories", get(list_repositories))
        .route(
            "/user/{username}/repository/{repository}/commits",
            get(list_commits),
        )
        .route("/user/{username}/top20", get(top_repositories))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .with_state(state)
}
