//! Setup-mode router tests
//!
//! With credentials missing the service serves guidance only: the analysis
//! route is absent, so no request can ever be built.

mod helpers;

use axum::http::StatusCode;
use detector_common::credentials::resolve_credentials;
use detector_common::credentials::EnvCredentials;
use detector_web::{build_setup_router, SetupState};
use helpers::{analyze_request, body_json, body_text, get_request, multipart_body};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use tower::ServiceExt;

fn halted_app() -> axum::Router {
    let dir = TempDir::new().unwrap();
    let secrets = dir.path().join("secrets.toml");
    let err = resolve_credentials(EnvCredentials::default(), &secrets).unwrap_err();
    build_setup_router(SetupState::new(&err, &secrets))
}

#[tokio::test]
async fn test_root_shows_setup_guidance() {
    let response = halted_app().oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains("credentials not found"));
    assert!(html.contains("[sightengine]"));
    assert!(html.contains("api_user = &quot;YOUR_API_USER&quot;"));
    assert!(!html.contains("file-input"));
}

#[tokio::test]
async fn test_analyze_route_is_not_mounted() {
    let body = multipart_body("file", "x.png", Some("image/png"), b"png");
    let response = halted_app().oneshot(analyze_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_unconfigured() {
    let response = halted_app().oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "unconfigured");
    assert!(body["last_error"]
        .as_str()
        .unwrap()
        .contains("Secrets file not found"));
}

#[tokio::test]
async fn test_missing_key_named_on_setup_page() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[sightengine]\napi_user = \"u\"\n").unwrap();

    let err = resolve_credentials(EnvCredentials::default(), file.path()).unwrap_err();
    let app = build_setup_router(SetupState::new(&err, file.path()));

    let html = body_text(app.oneshot(get_request("/")).await.unwrap().into_body()).await;
    assert!(html.contains("sightengine.api_secret"));
}
