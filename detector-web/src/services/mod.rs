//! Analysis services
//!
//! Pipeline per upload: build request → send → interpret.

pub mod analysis;
pub mod detection_client;
pub mod request_builder;
pub mod response_interpreter;

pub use analysis::{analyze, AnalysisError};
pub use detection_client::{ClientError, DetectionClient, RawResponse};
pub use request_builder::{build_request, AnalysisRequest, DETECTION_MODEL};
pub use response_interpreter::{interpret, InterpretationError};
