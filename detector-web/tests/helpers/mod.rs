//! Shared test helpers for detector-web integration tests
//!
//! - Stub detection service on 127.0.0.1:0 recording received multipart parts
//! - Multipart request bodies for router tests
//! - JSON body extraction

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use detector_common::Credentials;
use detector_web::services::DetectionClient;
use detector_web::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const BOUNDARY: &str = "detector-test-boundary";

/// One multipart part as received by the stub
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Canned reply of the stub detection service
#[derive(Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl StubReply {
    pub fn ok(body: &str) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    /// Hold each reply for `delay` before answering
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    received: Arc<Mutex<Vec<ReceivedPart>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

/// Running stub detection service
pub struct StubService {
    pub addr: SocketAddr,
    pub received: Arc<Mutex<Vec<ReceivedPart>>>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl StubService {
    /// Highest number of requests the stub was handling at the same moment
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/1.0/check.json", self.addr)
    }
}

async fn stub_check(State(state): State<StubState>, mut multipart: Multipart) -> impl IntoResponse {
    let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.peak_in_flight.fetch_max(now, Ordering::SeqCst);

    while let Some(field) = multipart.next_field().await.unwrap() {
        let part = ReceivedPart {
            name: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            data: field.bytes().await.unwrap().to_vec(),
        };
        state.received.lock().await.push(part);
    }

    if !state.reply.delay.is_zero() {
        tokio::time::sleep(state.reply.delay).await;
    }
    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    (
        state.reply.status,
        [("content-type", "application/json")],
        state.reply.body.clone(),
    )
}

/// Start a stub detection service answering every POST with `reply`
pub async fn spawn_stub(reply: StubReply) -> StubService {
    let received = Arc::new(Mutex::new(Vec::new()));
    let peak_in_flight = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/1.0/check.json", post(stub_check))
        .with_state(StubState {
            reply,
            received: received.clone(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: peak_in_flight.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubService {
        addr,
        received,
        peak_in_flight,
    }
}

/// An address with nothing listening on it
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/1.0/check.json", addr)
}

pub fn test_credentials() -> Credentials {
    Credentials::new("test-user", "test-secret")
}

/// Ready-mode router pointed at `endpoint`
pub fn app_for(endpoint: &str) -> Router {
    let client = DetectionClient::new(endpoint, Duration::from_secs(5)).unwrap();
    build_router(AppState::new(test_credentials(), client, 1024 * 1024))
}

/// Multipart body with one file part
pub fn multipart_body(field: &str, filename: &str, content_type: Option<&str>, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    if let Some(ct) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// POST /api/analyze request with the given multipart body
pub fn analyze_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

pub async fn body_text(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
