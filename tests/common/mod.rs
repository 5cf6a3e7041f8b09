#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use lms_api::app::app;
use lms_api::state::AppState;

/// Build the full router over fresh in-memory state. Handlers gate and
/// validate before touching storage, so contract tests need no database.
pub fn test_app() -> Router {
    app(AppState::new())
}

/// Fire one request at the router and decode the JSON envelope.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    role: Option<&str>,
    email: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header("x-user-role", role);
    }
    if let Some(email) = email {
        builder = builder.header("x-user-email", email);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}

pub async fn send_as(
    app: &Router,
    method: &str,
    uri: &str,
    role: &str,
    email: &str,
    body: Value,
) -> (StatusCode, Value) {
    send(app, method, uri, Some(role), Some(email), Some(body)).await
}
