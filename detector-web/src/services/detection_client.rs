//! Detection service HTTP client
//!
//! One POST per analysis, bounded by a hard timeout. No retries: a failed
//! attempt is reported straight back to the uploader.

use std::time::Duration;
use thiserror::Error;

use super::request_builder::AnalysisRequest;
use super::response_interpreter::extract_error_message;

const USER_AGENT: &str = concat!("detector-web/", env!("CARGO_PKG_VERSION"));

/// Detection client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable HTTP response: connection, DNS, timeout, body read
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a 4xx/5xx status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: u16,
        message: String,
        body: String,
    },

    /// Request could not be encoded as multipart
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),
}

/// Body of a 2xx response, not yet parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Detection service client
#[derive(Debug, Clone)]
pub struct DetectionClient {
    http_client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl DetectionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one detection request
    pub async fn send(&self, request: AnalysisRequest) -> Result<RawResponse, ClientError> {
        let form = request
            .into_form()
            .map_err(|e| ClientError::InvalidPayload(e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, "Posting image to detection service");

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(timeout = ?self.timeout, "Detection request timed out");
                }
                ClientError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Detection service request failed")
                    .to_string()
            });
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message,
                body,
            });
        }

        Ok(RawResponse::new(status.as_u16(), body))
    }
}
