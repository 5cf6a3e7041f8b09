//! Round-trip coverage for the in-memory assignment store.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn assignment_round_trips_through_the_store() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send_as(
        &app,
        "POST",
        "/api/assignments",
        "faculty",
        "f@lms.edu",
        json!({
            "title": "Essay 1",
            "course": "CS201",
            "dueDate": "2026-09-15",
            "students": ["s1@lms.edu"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Pending");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = common::send(
        &app,
        "GET",
        "/api/assignments",
        Some("student"),
        Some("s1@lms.edu"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = &body["data"][0];
    assert_eq!(listed["id"], json!(id));
    assert_eq!(listed["title"], "Essay 1");
    assert_eq!(listed["course"], "CS201");
    assert_eq!(listed["dueDate"], "2026-09-15");
    assert_eq!(listed["students"], json!(["s1@lms.edu"]));

    Ok(())
}

#[tokio::test]
async fn submission_grading_and_status_transitions() -> Result<()> {
    let app = common::test_app();

    let (_, body) = common::send_as(
        &app,
        "POST",
        "/api/assignments",
        "faculty",
        "f@lms.edu",
        json!({ "title": "Lab report", "course": "PH101", "dueDate": "2026-10-01" }),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/assignments/{}", id);

    let (status, body) = common::send_as(
        &app,
        "PUT",
        &uri,
        "student",
        "s1@lms.edu",
        json!({ "status": "Progress", "submission": "https://files/lab1.pdf" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Progress");
    assert_eq!(body["data"]["submission"], "https://files/lab1.pdf");

    let (status, body) = common::send_as(
        &app,
        "PUT",
        &uri,
        "faculty",
        "f@lms.edu",
        json!({ "status": "Done", "grade": "A-" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Done");
    assert_eq!(body["data"]["grade"], "A-");

    // Invalid transitions never clobber state
    let (status, _) = common::send_as(
        &app,
        "PUT",
        &uri,
        "faculty",
        "f@lms.edu",
        json!({ "status": "Finished" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = common::send(
        &app,
        "GET",
        "/api/assignments",
        Some("faculty"),
        Some("f@lms.edu"),
        None,
    )
    .await;
    assert_eq!(body["data"][0]["status"], "Done");

    Ok(())
}

#[tokio::test]
async fn deleting_a_missing_assignment_is_a_404() -> Result<()> {
    let app = common::test_app();

    let (status, _) = common::send(
        &app,
        "DELETE",
        "/api/assignments/00000000-0000-0000-0000-000000000000",
        Some("admin"),
        Some("admin@lms.edu"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::send(
        &app,
        "DELETE",
        "/api/assignments/not-a-uuid",
        Some("admin"),
        Some("admin@lms.edu"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}
