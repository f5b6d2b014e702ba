use axum::{
    extract::{Path, State},
    Json,
};

use ghfetch_core::github::Repository;

use crate::{handlers::AppError, state::AppState};

/// The user's most recently accessed repositories (GET /user/{username}/top20).
pub async fn top_repositories(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<Repository>>, AppError> {
    let repos = state.orchestrator.top_repositories(&username).await?;

    Ok(Json(repos))
}
