//! Course catalog. Mutations are Admin-only; any authenticated role may list.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Json;
use futures::TryStreamExt;
use mongodb::bson::doc;
use serde_json::{json, Value};

use crate::api::format::{record_to_api_value, records_to_api_values};
use crate::auth::{RequestContext, Role};
use crate::database::collections;
use crate::database::manager::DatabaseManager;
use crate::database::models::Course;
use crate::database::parse_object_id;
use crate::error::ApiError;

use super::{created, now_rfc3339, ok, opt_str, required_strings, set_document, str_vec};

const UPDATABLE_FIELDS: &[&str] = &[
    "name",
    "code",
    "instructor",
    "description",
    "semester",
    "credits",
    "enrolledStudents",
    "enrolledFaculty",
];

/// GET /api/courses
pub async fn list(ctx: RequestContext) -> Result<Json<Value>, ApiError> {
    // Listing requires only a valid role header
    let _ = ctx;

    let courses = DatabaseManager::collection::<Course>(collections::COURSES).await?;
    let all: Vec<Course> = courses.find(doc! {}, None).await?.try_collect().await?;

    Ok(ok(json!(records_to_api_values(&all))))
}

/// POST /api/courses
pub async fn create(
    ctx: RequestContext,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    ctx.require(&[Role::Admin])?;

    let values = required_strings(&payload, &["name", "code", "instructor"])?;

    let mut course = Course {
        id: None,
        name: values[0].clone(),
        code: values[1].clone(),
        instructor: values[2].clone(),
        description: opt_str(&payload, "description"),
        semester: opt_str(&payload, "semester"),
        credits: payload
            .get("credits")
            .and_then(Value::as_i64)
            .map(|c| c as i32),
        enrolled_students: str_vec(&payload, "enrolledStudents"),
        enrolled_faculty: str_vec(&payload, "enrolledFaculty"),
        created_at: now_rfc3339(),
    };

    let courses = DatabaseManager::collection::<Course>(collections::COURSES).await?;
    let result = courses.insert_one(&course, None).await?;
    course.id = result.inserted_id.as_object_id();

    tracing::info!(code = %course.code, "course created");
    Ok(created(record_to_api_value(&course)))
}

/// PUT /api/courses/:id
pub async fn update(
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    ctx.require(&[Role::Admin])?;
    let oid = parse_object_id(&id)?;
    let set = set_document(&payload, UPDATABLE_FIELDS)?;

    let courses = DatabaseManager::collection::<Course>(collections::COURSES).await?;
    let result = courses
        .update_one(doc! { "_id": oid }, doc! { "$set": set }, None)
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found(format!("course {} not found", id)));
    }

    let updated = courses
        .find_one(doc! { "_id": oid }, None)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("course {} not found", id)))?;

    Ok(ok(record_to_api_value(&updated)))
}

/// DELETE /api/courses/:id
pub async fn delete(ctx: RequestContext, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    ctx.require(&[Role::Admin])?;
    let oid = parse_object_id(&id)?;

    let courses = DatabaseManager::collection::<Course>(collections::COURSES).await?;
    let result = courses.delete_one(doc! { "_id": oid }, None).await?;
    if result.deleted_count == 0 {
        return Err(ApiError::not_found(format!("course {} not found", id)));
    }

    Ok(ok(json!({ "deleted": true })))
}
