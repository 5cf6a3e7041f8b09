//! User management (Admin only).

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Json;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use serde_json::{json, Value};

use crate::api::format::{record_to_api_value, records_to_api_values};
use crate::auth::{RequestContext, Role};
use crate::database::collections;
use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::database::parse_object_id;
use crate::error::ApiError;

use super::{created, ok, required_strings, set_document};

const UPDATABLE_FIELDS: &[&str] = &[
    "name",
    "phone",
    "govtIdType",
    "govtIdNumber",
    "interests",
    "academicRecords",
    "password",
];

/// GET /api/users - list all users, passwords projected out.
pub async fn list(ctx: RequestContext) -> Result<Json<Value>, ApiError> {
    ctx.require(&[Role::Admin])?;

    let users = DatabaseManager::collection::<User>(collections::USERS).await?;
    let options = FindOptions::builder()
        .projection(doc! { "password": 0 })
        .build();
    let all: Vec<User> = users.find(doc! {}, options).await?.try_collect().await?;

    Ok(ok(json!(records_to_api_values(&all))))
}

/// POST /api/users - create a user (same rules as self-registration).
pub async fn create(
    ctx: RequestContext,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    ctx.require(&[Role::Admin])?;

    let values = required_strings(&payload, &["name", "email", "password", "role"])?;
    let role: Role = values[3]
        .parse()
        .map_err(|_| ApiError::bad_request(format!("unknown role: {}", values[3])))?;

    let user = insert_user(&payload, &values[0], &values[1], &values[2], role).await?;
    Ok(created(user))
}

/// PUT /api/users/:id - update mutable fields. Role changes go through the
/// `role` field and must still parse as a known role.
pub async fn update(
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    ctx.require(&[Role::Admin])?;
    let oid = parse_object_id(&id)?;

    let mut set = set_document(&payload, UPDATABLE_FIELDS)
        // A role-only update is still a valid update
        .or_else(|e| match payload.get("role") {
            Some(_) => Ok(mongodb::bson::Document::new()),
            None => Err(e),
        })?;

    if let Some(raw_role) = payload.get("role").and_then(Value::as_str) {
        let role: Role = raw_role
            .parse()
            .map_err(|_| ApiError::bad_request(format!("unknown role: {}", raw_role)))?;
        set.insert("role", role.as_str());
    }

    if set.is_empty() {
        return Err(ApiError::bad_request("No updatable fields provided"));
    }

    let users = DatabaseManager::collection::<User>(collections::USERS).await?;
    let result = users
        .update_one(doc! { "_id": oid }, doc! { "$set": set }, None)
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found(format!("user {} not found", id)));
    }

    let options = mongodb::options::FindOneOptions::builder()
        .projection(doc! { "password": 0 })
        .build();
    let updated = users
        .find_one(doc! { "_id": oid }, options)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user {} not found", id)))?;

    Ok(ok(record_to_api_value(&updated)))
}

/// DELETE /api/users/:id - hard delete.
pub async fn delete(ctx: RequestContext, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    ctx.require(&[Role::Admin])?;
    let oid = parse_object_id(&id)?;

    let users = DatabaseManager::collection::<User>(collections::USERS).await?;
    let result = users.delete_one(doc! { "_id": oid }, None).await?;
    if result.deleted_count == 0 {
        return Err(ApiError::not_found(format!("user {} not found", id)));
    }

    Ok(ok(json!({ "deleted": true })))
}

/// Insert a user after the insert-time email uniqueness check. Uniqueness is
/// only enforced here, as in the source system: concurrent registrations can
/// still race past the existence check.
pub(crate) async fn insert_user(
    payload: &Value,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<Value, ApiError> {
    let users = DatabaseManager::collection::<User>(collections::USERS).await?;

    if users.find_one(doc! { "email": email }, None).await?.is_some() {
        return Err(ApiError::conflict("A user with this email already exists"));
    }

    let mut user = super::auth::user_from_payload(payload, name, email, password, role);
    let result = users.insert_one(&user, None).await?;

    user.id = result.inserted_id.as_object_id();
    user.password = None;
    tracing::info!(email = %email, role = %role, "user created");

    Ok(record_to_api_value(&user))
}
