use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::time_tracking::use_cases::clock_in::command::ClockIn;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ClockInBody {
    pub user_id: String,
    pub project_id: String,
    pub job_code: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<ClockInBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = ClockIn {
        time_entry_id: Uuid::now_v7().to_string(),
        user_id: body.user_id,
        project_id: body.project_id,
        job_code: body.job_code,
        at: state.clock.now(),
    };

    match state.clock_in_handler.handle(command).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => error.into_response(),
    }
}
