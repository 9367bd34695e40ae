use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::time_tracking::use_cases::start_break::command::StartBreak;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StartBreakBody {
    pub user_id: String,
    pub time_entry_id: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<StartBreakBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = StartBreak {
        break_id: Uuid::now_v7().to_string(),
        user_id: body.user_id,
        time_entry_id: body.time_entry_id,
        at: state.clock.now(),
    };

    match state.start_break_handler.handle(command).await {
        Ok(brk) => (StatusCode::CREATED, Json(brk)).into_response(),
        Err(error) => error.into_response(),
    }
}
