#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;
use vidscribe::{Database, DispatchRequest, ProcessingBackend, ReportLifecycle};
use vidscribe_server::app;
use vidscribe_server::state::AppState;

/// Backend that drops every dispatch. Submitted reports stay PENDING
/// until a test moves them through the lifecycle or the webhook route.
struct DroppingBackend;

impl ProcessingBackend for DroppingBackend {
    fn dispatch(&self, _request: DispatchRequest) {}
}

pub struct TestContext {
    pub lifecycle: Arc<ReportLifecycle>,
    pub app: axum::Router,
}

pub fn build_test_context() -> TestContext {
    let db = Database::open_in_memory().expect("test database should open");
    let lifecycle = Arc::new(ReportLifecycle::new(db, Arc::new(DroppingBackend)));
    let state = AppState {
        lifecycle: lifecycle.clone(),
    };
    let app = app::build_router(state);

    TestContext { lifecycle, app }
}

pub async fn request_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let req_body = body.unwrap_or(Value::Null).to_string();
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(req_body))
        .expect("request should build");

    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should be handled");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };

    (status, json)
}

pub async fn request_no_body(app: &axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should be handled");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };

    (status, json)
}

/// Submits a report through the API and returns its id.
pub async fn submit_report(app: &axum::Router, source_url: &str) -> String {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/reports",
        Some(serde_json::json!({"sourceUrl": source_url})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("id should exist").to_string()
}
