//! Error types for detector-web
//!
//! Every per-upload failure ends here and becomes a JSON body:
//!
//! ```json
//! { "error": { "code": "API_ERROR", "message": "API Error: bad image", "detail": {...} } }
//! ```

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::AnalysisError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Multipart body could not be read (status decided by axum, e.g. 413)
    #[error("Upload failed: {message}")]
    Upload { status: StatusCode, message: String },

    /// Analysis pipeline failure
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Upload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_code, detail) = match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", None),
            ApiError::Upload { status, .. } => (status, "UPLOAD_ERROR", None),
            ApiError::Analysis(ref err) => {
                let status = match err {
                    AnalysisError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, err.code(), err.detail())
            }
        };

        let mut error = json!({
            "code": error_code,
            "message": message,
        });
        if let Some(detail) = detail {
            error["detail"] = detail;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
