use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::time_tracking::use_cases::build_summaries::inbound::http as summaries_http;
use crate::modules::time_tracking::use_cases::clock_in::inbound::http as clock_in_http;
use crate::modules::time_tracking::use_cases::clock_out::inbound::http as clock_out_http;
use crate::modules::time_tracking::use_cases::current_session::inbound::http as session_http;
use crate::modules::time_tracking::use_cases::end_break::inbound::http as end_break_http;
use crate::modules::time_tracking::use_cases::list_catalog::inbound::http as catalog_http;
use crate::modules::time_tracking::use_cases::list_time_entries_by_user::inbound::http as list_http;
use crate::modules::time_tracking::use_cases::start_break::inbound::http as start_break_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/clock-in", post(clock_in_http::handle))
        .route("/clock-out", post(clock_out_http::handle))
        .route("/breaks/start", post(start_break_http::handle))
        .route("/breaks/end", post(end_break_http::handle))
        .route("/session", get(session_http::handle))
        .route("/time-entries", get(list_http::handle))
        .route("/summaries/daily", get(summaries_http::daily))
        .route("/summaries/weekly", get(summaries_http::weekly))
        .route("/summaries/projects", get(summaries_http::projects))
        .route("/summaries/refresh", post(summaries_http::refresh))
        .route("/projects", get(catalog_http::projects))
        .route("/jobs", get(catalog_http::jobs))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
