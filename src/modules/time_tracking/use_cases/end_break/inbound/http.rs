use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::time_tracking::use_cases::end_break::command::EndBreak;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct EndBreakBody {
    pub user_id: String,
    pub break_id: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<EndBreakBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = EndBreak {
        user_id: body.user_id,
        break_id: body.break_id,
        at: state.clock.now(),
    };

    match state.end_break_handler.handle(command).await {
        Ok(brk) => Json(brk).into_response(),
        Err(error) => error.into_response(),
    }
}
