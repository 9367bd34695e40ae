use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct JobsParams {
    pub project_id: Option<String>,
}

pub async fn projects(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog_handler.projects().await {
        Ok(projects) => Json(projects).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsParams>,
) -> impl IntoResponse {
    match state
        .catalog_handler
        .jobs(params.project_id.as_deref())
        .await
    {
        Ok(jobs) => Json(jobs).into_response(),
        Err(error) => error.into_response(),
    }
}
