//! Role-gate contract: unauthorized roles get a 403 before any storage access.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn course_mutations_require_admin() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/courses",
        "student",
        "s@lms.edu",
        json!({ "name": "Algorithms", "code": "CS201", "instructor": "Dr. Hoare" }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn user_listing_requires_admin() -> Result<()> {
    let app = common::test_app();

    let (status, _) =
        common::send(&app, "GET", "/api/users", Some("faculty"), Some("f@lms.edu"), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn content_creation_requires_admin_or_faculty() -> Result<()> {
    let app = common::test_app();

    let (status, _) = common::send_as(
        &app,
        "POST",
        "/api/content/videos",
        "student",
        "s@lms.edu",
        json!({ "title": "Lecture 1", "course": "CS201", "url": "https://cdn/l1.mp4" }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn discussion_creation_requires_admin_or_faculty() -> Result<()> {
    let app = common::test_app();

    let (status, _) = common::send_as(
        &app,
        "POST",
        "/api/discussions",
        "student",
        "s@lms.edu",
        json!({ "title": "Week 1", "content": "Kickoff", "course": "CS201" }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn task_creation_requires_admin() -> Result<()> {
    let app = common::test_app();

    for role in ["faculty", "student"] {
        let (status, _) = common::send_as(
            &app,
            "POST",
            "/api/tasks",
            role,
            "x@lms.edu",
            json!({ "title": "Read chapter 3", "dueDate": "2026-09-01" }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "role {} should be gated", role);
    }
    Ok(())
}

#[tokio::test]
async fn missing_role_header_is_forbidden() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(&app, "GET", "/api/courses", None, None, None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn unknown_role_is_forbidden() -> Result<()> {
    let app = common::test_app();

    let (status, _) = common::send(
        &app,
        "GET",
        "/api/courses",
        Some("professor"),
        Some("p@lms.edu"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn unknown_content_kind_is_not_found() -> Result<()> {
    let app = common::test_app();

    let (status, _) = common::send(
        &app,
        "GET",
        "/api/content/podcasts",
        Some("faculty"),
        Some("f@lms.edu"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
