//! Static asset handlers for the detector UI
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const DETECTOR_CSS: &str = include_str!("../../../static/detector.css");
const DETECTOR_JS: &str = include_str!("../../../static/detector.js");

/// GET /static/detector.css
pub async fn serve_detector_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        DETECTOR_CSS,
    )
        .into_response()
}

/// GET /static/detector.js
pub async fn serve_detector_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        DETECTOR_JS,
    )
        .into_response()
}
