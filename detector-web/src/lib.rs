//! detector-web library interface
//!
//! Exposes the analysis pipeline and router builders for the binary and for
//! integration tests.

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use detector_common::Credentials;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::services::DetectionClient;

/// Application state when credentials are loaded
#[derive(Clone)]
pub struct AppState {
    /// Detection service credentials, read-only after startup
    pub credentials: Arc<Credentials>,
    /// Outbound detection client
    pub client: DetectionClient,
    /// Held for the duration of one analysis; uploads are processed one at a time
    pub analysis_lock: Arc<Mutex<()>>,
    /// Maximum accepted upload body size
    pub max_upload_bytes: usize,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last analysis error for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(credentials: Credentials, client: DetectionClient, max_upload_bytes: usize) -> Self {
        Self {
            credentials: Arc::new(credentials),
            client,
            analysis_lock: Arc::new(Mutex::new(())),
            max_upload_bytes,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Application state after a configuration failure
///
/// Only setup guidance is served; no upload handling exists in this mode.
#[derive(Clone)]
pub struct SetupState {
    /// Human-readable configuration error
    pub error: String,
    /// Remediation instructions
    pub instructions: String,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl SetupState {
    pub fn new(error: &detector_common::ConfigurationError, secrets_file: &Path) -> Self {
        Self {
            error: error.to_string(),
            instructions: detector_common::credentials::setup_instructions(secrets_file),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router (credentials loaded)
pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .merge(api::ui_routes())
        .merge(api::analyze_routes().layer(upload_limit))
        .merge(api::health_routes())
        .with_state(state)
}

/// Build setup-guidance router (configuration failed)
///
/// The analysis route is not mounted.
pub fn build_setup_router(state: SetupState) -> Router {
    Router::new()
        .merge(api::setup_routes())
        .with_state(state)
}
