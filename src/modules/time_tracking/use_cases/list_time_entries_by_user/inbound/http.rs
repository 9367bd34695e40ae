use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::time_tracking::use_cases::list_time_entries_by_user::handler::{
    DEFAULT_LIMIT, ListTimeEntries,
};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListTimeEntriesParams {
    pub user_id: String,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub sort_desc: Option<bool>,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListTimeEntriesParams>,
) -> impl IntoResponse {
    let query = ListTimeEntries {
        user_id: params.user_id,
        offset: params.offset.unwrap_or(0),
        limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        sort_desc: params.sort_desc.unwrap_or(true),
    };
    match state.list_handler.handle(query, state.clock.now()).await {
        Ok(entries) => Json(entries).into_response(),
        Err(error) => error.into_response(),
    }
}
