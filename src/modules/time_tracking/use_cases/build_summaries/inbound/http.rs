use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::time_tracking::core::summaries::{DayTotals, WeeklyReport};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SummaryParams {
    pub user_id: String,
    pub date: NaiveDate,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub daily: DayTotals,
    pub weekly: WeeklyReport,
}

pub async fn daily(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> impl IntoResponse {
    match state.summaries.daily(&params.user_id, params.date).await {
        Ok(totals) => Json(totals).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn weekly(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> impl IntoResponse {
    match state.summaries.weekly(&params.user_id, params.date).await {
        Ok(week) => Json(week).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn projects(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> impl IntoResponse {
    match state
        .summaries
        .project_distribution(&params.user_id, params.date)
        .await
    {
        Ok(distribution) => Json(distribution).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn refresh(
    State(state): State<AppState>,
    body: Result<Json<SummaryParams>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    match state.summaries.rebuild(&body.user_id, body.date).await {
        Ok((daily, weekly)) => Json(RefreshResponse { daily, weekly }).into_response(),
        Err(error) => error.into_response(),
    }
}
