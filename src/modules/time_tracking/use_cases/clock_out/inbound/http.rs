use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::time_tracking::use_cases::clock_out::command::ClockOut;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ClockOutBody {
    pub user_id: String,
    pub time_entry_id: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<ClockOutBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = ClockOut {
        user_id: body.user_id,
        time_entry_id: body.time_entry_id,
        at: state.clock.now(),
    };

    match state.clock_out_handler.handle(command).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(error) => error.into_response(),
    }
}
