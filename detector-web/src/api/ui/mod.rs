//! UI Routes - HTML pages for the detector web interface
//!
//! Vanilla HTML/CSS/JS, no frameworks.
//!
//! - **Static Assets** (`static_assets`): CSS/JS file serving
//! - **Root Page** (`root`): upload form, preview, result banners
//! - **Setup Page** (`setup`): credential setup guidance when halted

use axum::{routing::get, Router};

use crate::{AppState, SetupState};

mod root;
mod setup;
mod static_assets;

use root::root_page;
use setup::setup_page;
use static_assets::{serve_detector_css, serve_detector_js};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_page))
        .route("/static/detector.css", get(serve_detector_css))
        .route("/static/detector.js", get(serve_detector_js))
}

/// Build routes served while halted on missing configuration
pub fn setup_routes() -> Router<SetupState> {
    Router::new()
        .route("/", get(setup_page))
        .route("/health", get(crate::api::health::setup_health_check))
        .route("/static/detector.css", get(serve_detector_css))
}

/// Page header shared by all pages
fn page_header(title: &str) -> String {
    let git_hash = env!("GIT_HASH");
    let short_hash = git_hash.get(..8).unwrap_or(git_hash);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/detector.css">
</head>
<body>
    <header>
        <div class="header-content">
            <div class="header-left">
                <h1>AI-Generated Image Detector</h1>
                <p class="subtitle">Upload an image to check the probability of it being AI-generated using the machine learning model.</p>
            </div>
            <div class="header-right">
                <div class="build-info-line">detector-web v{version}</div>
                <div class="build-info-line">{hash} ({profile})</div>
                <div class="build-info-line">{timestamp}</div>
            </div>
        </div>
    </header>
    <main class="content">
"#,
        title = title,
        version = env!("CARGO_PKG_VERSION"),
        hash = short_hash,
        profile = env!("BUILD_PROFILE"),
        timestamp = env!("BUILD_TIMESTAMP"),
    )
}

const PAGE_FOOTER: &str = "    </main>\n</body>\n</html>\n";

/// Minimal HTML escaping for text interpolated into pages
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
