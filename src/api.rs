//! HTTP health endpoint for uptime monitors.
//!
//! Spawned as a background task by the gateway. Read-only: every handler
//! goes through the locked accessors of [`AppState`].

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use mimwatch_core::{config::ApiConfig, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

const SERVICE_NAME: &str = "mimwatch";

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    state: Arc<AppState>,
}

/// `GET /` and `GET /health`: liveness with uptime and counters.
async fn health(State(api): State<ApiState>) -> Json<Value> {
    let now = Utc::now();
    let stats = api.state.stats();

    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "timestamp": now.to_rfc3339(),
        "uptime_secs": stats.uptime_secs(now),
        "subscribers": api.state.registry.len(),
        "seen_news": api.state.seen.len(),
        "news_sent": stats.total_news_sent,
        "commands_processed": stats.total_commands_processed,
    }))
}

fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .with_state(state)
}

/// Start the health server. Called from `Gateway::run()`.
///
/// A bind failure is logged and the task ends; the daemon keeps running.
pub async fn serve(config: ApiConfig, state: Arc<AppState>) {
    let app = build_router(ApiState { state });
    let addr = format!("{}:{}", config.host, config.port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("health server failed to bind to {addr}: {e}");
            return;
        }
    };

    info!("Health server listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        error!("health server error: {e}");
    }
}
