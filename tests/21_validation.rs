//! Required-field contract: creation with missing fields is a 400 with
//! per-field errors, checked before any storage access.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn course_creation_reports_missing_fields() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/courses",
        "admin",
        "admin@lms.edu",
        json!({ "name": "Algorithms" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["code"].is_string());
    assert!(body["field_errors"]["instructor"].is_string());
    Ok(())
}

#[tokio::test]
async fn video_creation_requires_url() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/content/videos",
        "faculty",
        "f@lms.edu",
        json!({ "title": "Lecture 1", "course": "CS201" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["url"].is_string());
    Ok(())
}

#[tokio::test]
async fn note_creation_requires_content() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/content/notes",
        "faculty",
        "f@lms.edu",
        json!({ "title": "Summary", "course": "CS201" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["content"].is_string());
    Ok(())
}

#[tokio::test]
async fn discussion_creation_requires_course() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/discussions",
        "faculty",
        "f@lms.edu",
        json!({ "title": "Week 1", "content": "Kickoff" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["course"].is_string());
    Ok(())
}

#[tokio::test]
async fn assignment_creation_requires_due_date() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/assignments",
        "faculty",
        "f@lms.edu",
        json!({ "title": "Essay", "course": "CS201" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["dueDate"].is_string());
    Ok(())
}

#[tokio::test]
async fn assignment_creation_rejects_invalid_status() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/assignments",
        "faculty",
        "f@lms.edu",
        json!({
            "title": "Essay",
            "course": "CS201",
            "dueDate": "2026-09-15",
            "status": "done"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn task_creation_requires_title() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/tasks",
        "admin",
        "admin@lms.edu",
        json!({ "dueDate": "2026-09-01" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["title"].is_string());
    Ok(())
}

#[tokio::test]
async fn explain_requires_title() -> Result<()> {
    let app = common::test_app();

    let (status, body) =
        common::send(&app, "POST", "/api/ai-explain", None, None, Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["title"].is_string());
    Ok(())
}

#[tokio::test]
async fn malformed_record_id_is_a_bad_request() -> Result<()> {
    let app = common::test_app();

    let (status, _) = common::send_as(
        &app,
        "PUT",
        "/api/courses/not-an-object-id",
        "admin",
        "admin@lms.edu",
        json!({ "name": "Renamed" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
