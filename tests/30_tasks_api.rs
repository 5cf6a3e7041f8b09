//! Round-trip coverage for the in-memory task store.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn task_round_trips_through_the_store() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/tasks",
        "admin",
        "admin@lms.edu",
        json!({
            "title": "Read chapter 3",
            "description": "Sections 3.1-3.4",
            "course": "CS201",
            "assignedStudents": ["s1@lms.edu", "s2@lms.edu"],
            "dueDate": "2026-09-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let task = &body["data"];
    assert!(task["id"].as_str().is_some());
    assert_eq!(task["createdBy"], "admin@lms.edu");
    assert_eq!(task["status"], "Pending");

    // Identical field values on read-back
    let (status, body) =
        common::send(&app, "GET", "/api/tasks", Some("admin"), Some("admin@lms.edu"), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = &body["data"][0];
    assert_eq!(listed["title"], "Read chapter 3");
    assert_eq!(listed["description"], "Sections 3.1-3.4");
    assert_eq!(listed["course"], "CS201");
    assert_eq!(listed["dueDate"], "2026-09-01");
    assert_eq!(listed["assignedStudents"], json!(["s1@lms.edu", "s2@lms.edu"]));

    Ok(())
}

#[tokio::test]
async fn students_only_see_their_own_tasks() -> Result<()> {
    let app = common::test_app();

    common::send_as(
        &app,
        "POST",
        "/api/tasks",
        "admin",
        "admin@lms.edu",
        json!({ "title": "For s1 only", "assignedStudents": ["s1@lms.edu"], "dueDate": "2026-09-01" }),
    )
    .await;

    let (_, body) =
        common::send(&app, "GET", "/api/tasks", Some("student"), Some("s1@lms.edu"), None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (_, body) =
        common::send(&app, "GET", "/api/tasks", Some("student"), Some("s2@lms.edu"), None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

    Ok(())
}

#[tokio::test]
async fn assigned_student_may_only_move_status() -> Result<()> {
    let app = common::test_app();

    let (_, body) = common::send_as(
        &app,
        "POST",
        "/api/tasks",
        "admin",
        "admin@lms.edu",
        json!({ "title": "Lab 1", "assignedTo": "s1@lms.edu", "dueDate": "2026-09-01" }),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Status-only update by the assigned student is allowed
    let (status, body) = common::send_as(
        &app,
        "PUT",
        &format!("/api/tasks/{}", id),
        "student",
        "s1@lms.edu",
        json!({ "status": "Done" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Done");

    // Anything beyond status is rejected
    let (status, _) = common::send_as(
        &app,
        "PUT",
        &format!("/api/tasks/{}", id),
        "student",
        "s1@lms.edu",
        json!({ "status": "Pending", "title": "Hijacked" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // An unassigned student cannot touch the task at all
    let (status, _) = common::send_as(
        &app,
        "PUT",
        &format!("/api/tasks/{}", id),
        "student",
        "s2@lms.edu",
        json!({ "status": "Pending" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn deleting_a_missing_task_is_a_404_not_a_crash() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(
        &app,
        "DELETE",
        "/api/tasks/00000000-0000-0000-0000-000000000000",
        Some("admin"),
        Some("admin@lms.edu"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    // The process is still healthy afterwards
    let (status, _) = common::send(&app, "GET", "/", None, None, None).await;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_task() -> Result<()> {
    let app = common::test_app();

    let (_, body) = common::send_as(
        &app,
        "POST",
        "/api/tasks",
        "admin",
        "admin@lms.edu",
        json!({ "title": "Temp", "dueDate": "2026-09-01" }),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = common::send(
        &app,
        "DELETE",
        &format!("/api/tasks/{}", id),
        Some("admin"),
        Some("admin@lms.edu"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) =
        common::send(&app, "GET", "/api/tasks", Some("admin"), Some("admin@lms.edu"), None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    Ok(())
}
