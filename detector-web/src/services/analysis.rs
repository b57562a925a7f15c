//! Analysis pipeline: build → send → interpret
//!
//! Returns either a [`Verdict`] or one tagged [`AnalysisError`]; presentation
//! is left entirely to the caller.

use detector_common::Credentials;
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::detection_client::{ClientError, DetectionClient};
use super::request_builder::build_request;
use super::response_interpreter::{interpret, InterpretationError};
use crate::models::{UploadedImage, Verdict};

/// Per-upload analysis failure
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Connection, DNS, timeout or other transport failure
    #[error("Network Error: Failed to connect to machine learning model. {0}")]
    Transport(#[source] reqwest::Error),

    /// Detection service answered 4xx/5xx
    #[error("Network Error: Detection service returned HTTP {status}. {message}")]
    HttpStatus {
        status: u16,
        message: String,
        body: String,
    },

    /// Malformed body, API-level failure or missing probability
    #[error(transparent)]
    Interpretation(#[from] InterpretationError),

    /// Anything else
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl AnalysisError {
    /// Stable machine-readable error kind
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Transport(_) => "TRANSPORT_ERROR",
            AnalysisError::HttpStatus { .. } => "HTTP_STATUS_ERROR",
            AnalysisError::Interpretation(InterpretationError::Api { .. }) => "API_ERROR",
            AnalysisError::Interpretation(InterpretationError::MalformedResponse { .. }) => {
                "MALFORMED_RESPONSE"
            }
            AnalysisError::Interpretation(InterpretationError::MissingField { .. }) => {
                "MISSING_FIELD"
            }
            AnalysisError::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    /// Diagnostic payload: raw text for undecodable bodies, parsed document
    /// for API and missing-field failures, response body for HTTP failures
    pub fn detail(&self) -> Option<serde_json::Value> {
        match self {
            AnalysisError::HttpStatus { body, .. } if !body.trim().is_empty() => Some(
                serde_json::from_str(body)
                    .unwrap_or_else(|_| serde_json::Value::String(body.clone())),
            ),
            AnalysisError::Interpretation(InterpretationError::MalformedResponse { raw, .. }) => {
                Some(serde_json::Value::String(raw.clone()))
            }
            AnalysisError::Interpretation(InterpretationError::Api { document, .. })
            | AnalysisError::Interpretation(InterpretationError::MissingField { document }) => {
                Some(document.clone())
            }
            _ => None,
        }
    }
}

impl From<ClientError> for AnalysisError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(e) => AnalysisError::Transport(e),
            ClientError::HttpStatus {
                status,
                message,
                body,
            } => AnalysisError::HttpStatus {
                status,
                message,
                body,
            },
            ClientError::InvalidPayload(msg) => AnalysisError::Unexpected(msg),
        }
    }
}

/// Run one analysis cycle for an uploaded image
pub async fn analyze(
    client: &DetectionClient,
    credentials: &Credentials,
    image: UploadedImage,
) -> Result<Verdict, AnalysisError> {
    let span = info_span!("analysis", id = %Uuid::new_v4());

    let result = run_pipeline(client, credentials, image)
        .instrument(span.clone())
        .await;

    if let Err(e) = &result {
        span.in_scope(|| warn!(code = e.code(), "Analysis failed: {}", e));
    }
    result
}

async fn run_pipeline(
    client: &DetectionClient,
    credentials: &Credentials,
    image: UploadedImage,
) -> Result<Verdict, AnalysisError> {
    info!(
        filename = %image.filename,
        mime_type = %image.mime_type,
        bytes = image.len(),
        "Analyzing image"
    );

    let request = build_request(image, credentials.clone());
    let raw = client.send(request).await?;
    debug!(status = raw.status, bytes = raw.body.len(), "Detection service responded");
    let verdict = interpret(&raw)?;

    info!(
        probability = verdict.probability,
        tier = ?verdict.tier,
        "Analysis complete"
    );
    Ok(verdict)
}
