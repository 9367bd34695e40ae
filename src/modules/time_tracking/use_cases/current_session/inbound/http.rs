use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SessionParams {
    pub user_id: String,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<SessionParams>,
) -> impl IntoResponse {
    match state
        .session_handler
        .handle(&params.user_id, state.clock.now())
        .await
    {
        Ok(view) => Json(view).into_response(),
        Err(error) => error.into_response(),
    }
}
