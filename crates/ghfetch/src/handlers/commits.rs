use axum::{
    extract::{Path, Query, State},
    Json,
};

use ghfetch_core::fetch::CommitListOptions;
use ghfetch_core::github::Commit;

use crate::{
    handlers::{repositories::PageQuery, AppError},
    state::AppState,
};

/// List commits of a repository (GET /user/{username}/repository/{repository}/commits).
pub async fn list_commits(
    State(state): State<AppState>,
    Path((username, repository)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Commit>>, AppError> {
    let options = CommitListOptions::new(query.list_options());

    let commits = state
        .orchestrator
        .list_commits(&username, &repository, &options)
        .await?;

    Ok(Json(commits))
}
