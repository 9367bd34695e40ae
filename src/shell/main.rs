use axum::{Extension, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use time_tracking::modules::time_tracking::adapters::outbound::in_memory_catalog::InMemoryCatalog;
use time_tracking::modules::time_tracking::adapters::outbound::in_memory_store::InMemoryStore;
use time_tracking::shared::core::clock::SystemClock;
use time_tracking::shell::config::AppConfig;
use time_tracking::shell::graphql::{ENDPOINT, build_schema, graphiql, graphql};
use time_tracking::shell::http::router;
use time_tracking::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    // In-memory deps for now
    let state = AppState::in_memory(
        Arc::new(InMemoryStore::new()),
        Arc::new(InMemoryCatalog::seeded()),
        Arc::new(SystemClock),
        config.policy,
    );
    let schema = build_schema(state.clone());

    let app = router(state)
        .route(ENDPOINT, get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!(
        addr = %config.bind_addr,
        daily_regular_hours = config.policy.daily_regular_hours,
        week_start = %config.policy.week_start,
        "time tracking service listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
