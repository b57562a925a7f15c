//! Image analysis endpoint
//!
//! POST /api/analyze (multipart/form-data, one `file` part)
//!
//! **Response (200):**
//! ```json
//! {
//!   "outcome": "verdict",
//!   "filename": "cat.png",
//!   "probability": 0.83,
//!   "tier": "HIGH",
//!   "display_percent": "83.00%",
//!   "message": "High probability of being AI-generated.",
//!   "banner": "warning"
//! }
//! ```
//!
//! **Errors:** 400 for a non-multipart body or a missing or unsupported
//! file, 413 over the upload limit, 502 for detection service failures, 500
//! for anything unexpected. See [`crate::error`].

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::models::upload::{resolve_mime_type, UploadedImage};
use crate::models::{Banner, Verdict};
use crate::services::analyze;
use crate::{ApiError, ApiResult, AppState};

/// Name of the multipart part carrying the image
pub const FILE_FIELD: &str = "file";

/// Successful analysis outcome
#[derive(Debug, Serialize)]
pub struct AnalysisOutcome {
    /// Always "verdict"
    pub outcome: &'static str,
    pub filename: String,
    #[serde(flatten)]
    pub verdict: Verdict,
    /// Tier description shown in the result banner
    pub message: &'static str,
    pub banner: Banner,
}

impl AnalysisOutcome {
    fn new(filename: String, verdict: Verdict) -> Self {
        Self {
            outcome: "verdict",
            filename,
            message: verdict.tier.message(),
            banner: verdict.tier.banner(),
            verdict,
        }
    }
}

/// POST /api/analyze handler
///
/// Uploads are analyzed one at a time; a second upload waits until the
/// first has its result.
pub async fn analyze_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<AnalysisOutcome>> {
    let image = read_upload(multipart?).await?;
    let filename = image.filename.clone();

    let result = {
        let _in_flight = state.analysis_lock.lock().await;
        analyze(&state.client, &state.credentials, image).await
    };

    match result {
        Ok(verdict) => Ok(Json(AnalysisOutcome::new(filename, verdict))),
        Err(e) => {
            *state.last_error.write().await = Some(e.to_string());
            Err(ApiError::Analysis(e))
        }
    }
}

/// Extract the image part from the multipart body
async fn read_upload(mut multipart: Multipart) -> ApiResult<UploadedImage> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let mime_type = resolve_mime_type(field.content_type(), &filename).ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Unsupported file type for '{}'. Upload a jpg, jpeg or png image.",
                filename
            ))
        })?;
        let bytes = field.bytes().await?.to_vec();

        info!(filename = %filename, bytes = bytes.len(), "Received upload");
        return Ok(UploadedImage::new(filename, mime_type, bytes));
    }

    Err(ApiError::BadRequest(format!(
        "Missing '{}' part in multipart body",
        FILE_FIELD
    )))
}

/// Build analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze_upload))
}
