use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use ghfetch_core::fetch::{ListOptions, RepositoryListOptions};
use ghfetch_core::github::Repository;

use crate::{handlers::AppError, state::AppState};

/// Query parameters for paged listings.
///
/// Kept as raw strings so that garbage falls back to the defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub perpage: Option<String>,
}

impl PageQuery {
    pub fn list_options(&self) -> ListOptions {
        ListOptions::from_query(self.page.as_deref(), self.perpage.as_deref())
    }
}

/// List a user's public repositories (GET /user/{username}/repositories).
pub async fn list_repositories(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Repository>>, AppError> {
    let options = RepositoryListOptions::public(query.list_options());

    let repos = state
        .orchestrator
        .list_repositories(&username, &options)
        .await?;

    Ok(Json(repos))
}
