//! Admin-created tasks, assigned to students. Process-local storage, same
//! durability caveats as assignments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{RequestContext, Role};
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::Task;

use super::{created, ok, opt_str, required_strings, str_vec};

fn parse_task_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request(format!("Invalid record id: {}", id)))
}

/// GET /api/tasks - students only see tasks assigned to them.
pub async fn list(ctx: RequestContext, State(state): State<AppState>) -> Json<Value> {
    let tasks = state.tasks.read().await;

    let visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| ctx.role != Role::Student || t.is_assigned_to(&ctx.email))
        .collect();

    ok(json!(visible))
}

/// POST /api/tasks - Admin only.
pub async fn create(
    ctx: RequestContext,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    ctx.require(&[Role::Admin])?;

    let values = required_strings(&payload, &["title", "dueDate"])?;

    let task = Task {
        id: Uuid::new_v4(),
        title: values[0].clone(),
        description: opt_str(&payload, "description"),
        course: opt_str(&payload, "course"),
        created_by: ctx.email.clone(),
        assigned_to: opt_str(&payload, "assignedTo"),
        assigned_students: str_vec(&payload, "assignedStudents"),
        due_date: values[1].clone(),
        status: opt_str(&payload, "status").unwrap_or_else(|| "Pending".to_string()),
    };

    let body = json!(task);
    state.tasks.write().await.push(task);

    Ok(created(body))
}

/// PUT /api/tasks/:id - Admin edits anything; an assigned student may only
/// move the status.
pub async fn update(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_task_id(&id)?;

    let mut tasks = state.tasks.write().await;
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| ApiError::not_found(format!("task {} not found", id)))?;

    if ctx.is_admin() {
        if let Some(title) = opt_str(&payload, "title") {
            task.title = title;
        }
        if let Some(description) = opt_str(&payload, "description") {
            task.description = Some(description);
        }
        if let Some(course) = opt_str(&payload, "course") {
            task.course = Some(course);
        }
        if let Some(assigned_to) = opt_str(&payload, "assignedTo") {
            task.assigned_to = Some(assigned_to);
        }
        if payload.get("assignedStudents").is_some() {
            task.assigned_students = str_vec(&payload, "assignedStudents");
        }
        if let Some(due) = opt_str(&payload, "dueDate") {
            task.due_date = due;
        }
        if let Some(status) = opt_str(&payload, "status") {
            task.status = status;
        }
    } else if ctx.role == Role::Student && task.is_assigned_to(&ctx.email) {
        let only_status = payload
            .as_object()
            .map(|m| m.keys().all(|k| k == "status"))
            .unwrap_or(false);
        if !only_status {
            return Err(ApiError::forbidden(
                "assigned students may only update the task status",
            ));
        }
        if let Some(status) = opt_str(&payload, "status") {
            task.status = status;
        }
    } else {
        return Err(ApiError::forbidden(
            "only an admin or an assigned student may update this task",
        ));
    }

    Ok(ok(json!(*task)))
}

/// DELETE /api/tasks/:id - Admin only.
pub async fn delete(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ctx.require(&[Role::Admin])?;
    let id = parse_task_id(&id)?;

    let mut tasks = state.tasks.write().await;
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == before {
        return Err(ApiError::not_found(format!("task {} not found", id)));
    }

    Ok(ok(json!({ "deleted": true })))
}
