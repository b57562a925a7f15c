//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{AppState, SetupState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" when serving uploads, "unconfigured" when halted on setup
    pub status: String,
    /// Module name ("detector-web")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// Last error message if any (for diagnostics)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl HealthResponse {
    fn new(status: &str, startup_time: DateTime<Utc>, last_error: Option<String>) -> Self {
        let uptime = Utc::now().signed_duration_since(startup_time);

        Self {
            status: status.to_string(),
            module: "detector-web".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime.num_seconds().max(0) as u64,
            last_error,
        }
    }
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let last_error = state.last_error.read().await.clone();
    Json(HealthResponse::new("ok", state.startup_time, last_error))
}

/// GET /health while halted on missing configuration
pub async fn setup_health_check(State(state): State<SetupState>) -> Json<HealthResponse> {
    Json(HealthResponse::new(
        "unconfigured",
        state.startup_time,
        Some(state.error.clone()),
    ))
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
