mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn root_returns_service_descriptor() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(&app, "GET", "/", None, None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "LMS API");
    assert!(body["data"]["endpoints"]["courses"].is_string());
    Ok(())
}

#[tokio::test]
async fn health_reports_ok_or_degraded() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(&app, "GET", "/health", None, None, None).await;

    // OK with a reachable database, SERVICE_UNAVAILABLE without one; both are
    // valid liveness answers.
    assert!(
        status == StatusCode::OK || status == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        status
    );
    assert!(body["data"]["status"].is_string());
    Ok(())
}
