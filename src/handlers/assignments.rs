//! Assignments. Held in process memory (no persistence) and, as in the
//! source system, carrying no explicit role gate beyond a valid role header.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{Assignment, AssignmentStatus};

use super::{created, now_rfc3339, ok, opt_str, required_strings, str_vec};

fn parse_status(raw: &str) -> Result<AssignmentStatus, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::bad_request(format!(
            "invalid status: {} (expected Pending, Progress, or Done)",
            raw
        ))
    })
}

fn parse_assignment_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request(format!("Invalid record id: {}", id)))
}

/// GET /api/assignments
pub async fn list(ctx: RequestContext, State(state): State<AppState>) -> Json<Value> {
    let _ = ctx;
    let assignments = state.assignments.read().await;
    ok(json!(*assignments))
}

/// POST /api/assignments
pub async fn create(
    ctx: RequestContext,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let _ = ctx;
    let values = required_strings(&payload, &["title", "course", "dueDate"])?;

    let status = match payload.get("status").and_then(Value::as_str) {
        Some(raw) => parse_status(raw)?,
        None => AssignmentStatus::Pending,
    };

    let assignment = Assignment {
        id: Uuid::new_v4(),
        title: values[0].clone(),
        course: values[1].clone(),
        due_date: values[2].clone(),
        status,
        students: str_vec(&payload, "students"),
        submission: opt_str(&payload, "submission"),
        grade: opt_str(&payload, "grade"),
        created_at: now_rfc3339(),
    };

    let body = json!(assignment);
    state.assignments.write().await.push(assignment);

    Ok(created(body))
}

/// PUT /api/assignments/:id - status transitions, submission, grading, edits.
pub async fn update(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let _ = ctx;
    let id = parse_assignment_id(&id)?;

    // Validate before taking the write lock
    let status = match payload.get("status").and_then(Value::as_str) {
        Some(raw) => Some(parse_status(raw)?),
        None => None,
    };

    let mut assignments = state.assignments.write().await;
    let assignment = assignments
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| ApiError::not_found(format!("assignment {} not found", id)))?;

    if let Some(status) = status {
        assignment.status = status;
    }
    if let Some(title) = opt_str(&payload, "title") {
        assignment.title = title;
    }
    if let Some(course) = opt_str(&payload, "course") {
        assignment.course = course;
    }
    if let Some(due) = opt_str(&payload, "dueDate") {
        assignment.due_date = due;
    }
    if let Some(submission) = opt_str(&payload, "submission") {
        assignment.submission = Some(submission);
    }
    if let Some(grade) = opt_str(&payload, "grade") {
        assignment.grade = Some(grade);
    }
    if payload.get("students").is_some() {
        assignment.students = str_vec(&payload, "students");
    }

    Ok(ok(json!(*assignment)))
}

/// DELETE /api/assignments/:id
pub async fn delete(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let _ = ctx;
    let id = parse_assignment_id(&id)?;

    let mut assignments = state.assignments.write().await;
    let before = assignments.len();
    assignments.retain(|a| a.id != id);
    if assignments.len() == before {
        return Err(ApiError::not_found(format!("assignment {} not found", id)));
    }

    Ok(ok(json!({ "deleted": true })))
}
