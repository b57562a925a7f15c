//! Detection response interpretation
//!
//! Expected shapes:
//!
//! ```json
//! { "status": "success", "type": { "ai_generated": 0.83 } }
//! { "status": "failure", "error": { "message": "..." } }
//! ```
//!
//! The body is untrusted. Only the probability is required; every other
//! field is read defensively.

use serde_json::Value;
use thiserror::Error;

use super::detection_client::RawResponse;
use crate::models::Verdict;

const SUCCESS_STATUS: &str = "success";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Interpretation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretationError {
    /// Body is not JSON; raw text kept for diagnostics
    #[error("Could not decode the response from the API (invalid JSON)")]
    MalformedResponse { raw: String, reason: String },

    /// Service reported a non-success status
    #[error("API Error: {message}")]
    Api { message: String, document: Value },

    /// Success status without a numeric `type.ai_generated`
    #[error("Could not extract AI probability from the API response")]
    MissingField { document: Value },
}

/// Interpret a raw detection response
pub fn interpret(raw: &RawResponse) -> Result<Verdict, InterpretationError> {
    let document: Value =
        serde_json::from_str(&raw.body).map_err(|e| InterpretationError::MalformedResponse {
            raw: raw.body.clone(),
            reason: e.to_string(),
        })?;

    if document.get("status").and_then(Value::as_str) != Some(SUCCESS_STATUS) {
        let message = error_message(&document).unwrap_or(UNKNOWN_ERROR).to_string();
        return Err(InterpretationError::Api { message, document });
    }

    let probability = document
        .get("type")
        .and_then(|t| t.get("ai_generated"))
        .and_then(Value::as_f64);

    match probability {
        Some(p) => Ok(Verdict::from_probability(p)),
        None => Err(InterpretationError::MissingField { document }),
    }
}

/// `error.message` from a response body, if the body is JSON and has one
pub fn extract_error_message(body: &str) -> Option<String> {
    let document: Value = serde_json::from_str(body).ok()?;
    error_message(&document).map(str::to_string)
}

fn error_message(document: &Value) -> Option<&str> {
    document
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
}
