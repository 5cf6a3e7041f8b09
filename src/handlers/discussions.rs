//! Course discussions with inline replies. Updates and deletes are restricted
//! to the creator or an admin.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Json;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use serde_json::{json, Value};

use crate::api::format::{record_to_api_value, records_to_api_values};
use crate::auth::{RequestContext, Role};
use crate::database::collections;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Discussion, Reply};
use crate::database::parse_object_id;
use crate::error::ApiError;

use super::{created, now_rfc3339, ok, required_strings, set_document, str_vec};

const UPDATABLE_FIELDS: &[&str] = &["title", "content", "course", "visibleTo"];

fn visibility_filter(ctx: &RequestContext) -> Document {
    if ctx.role == Role::Student {
        doc! {
            "$or": [
                { "visibleTo": { "$exists": false } },
                { "visibleTo": { "$size": 0 } },
                { "visibleTo": ctx.email.as_str() },
            ]
        }
    } else {
        doc! {}
    }
}

/// Creator-or-admin check, 403 otherwise.
fn require_owner(ctx: &RequestContext, discussion: &Discussion) -> Result<(), ApiError> {
    if ctx.is_admin() || discussion.created_by == ctx.email {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "only the discussion creator or an admin may modify it",
        ))
    }
}

/// GET /api/discussions
pub async fn list(ctx: RequestContext) -> Result<Json<Value>, ApiError> {
    let discussions =
        DatabaseManager::collection::<Discussion>(collections::DISCUSSIONS).await?;
    let all: Vec<Discussion> = discussions
        .find(visibility_filter(&ctx), None)
        .await?
        .try_collect()
        .await?;

    Ok(ok(json!(records_to_api_values(&all))))
}

/// POST /api/discussions
pub async fn create(
    ctx: RequestContext,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    ctx.require(&[Role::Admin, Role::Faculty])?;

    let values = required_strings(&payload, &["title", "content", "course"])?;

    let mut discussion = Discussion {
        id: None,
        title: values[0].clone(),
        content: values[1].clone(),
        course: values[2].clone(),
        created_by: ctx.email.clone(),
        created_by_role: ctx.role.as_str().to_string(),
        visible_to: str_vec(&payload, "visibleTo"),
        replies: Vec::new(),
        created_at: now_rfc3339(),
    };

    let discussions =
        DatabaseManager::collection::<Discussion>(collections::DISCUSSIONS).await?;
    let result = discussions.insert_one(&discussion, None).await?;
    discussion.id = result.inserted_id.as_object_id();

    tracing::info!(title = %discussion.title, "discussion created");
    Ok(created(record_to_api_value(&discussion)))
}

/// PUT /api/discussions/:id
pub async fn update(
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let oid = parse_object_id(&id)?;
    let set = set_document(&payload, UPDATABLE_FIELDS)?;

    let discussions =
        DatabaseManager::collection::<Discussion>(collections::DISCUSSIONS).await?;
    let existing = discussions
        .find_one(doc! { "_id": oid }, None)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("discussion {} not found", id)))?;
    require_owner(&ctx, &existing)?;

    discussions
        .update_one(doc! { "_id": oid }, doc! { "$set": set }, None)
        .await?;

    let updated = discussions
        .find_one(doc! { "_id": oid }, None)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("discussion {} not found", id)))?;

    Ok(ok(record_to_api_value(&updated)))
}

/// DELETE /api/discussions/:id
pub async fn delete(ctx: RequestContext, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let oid = parse_object_id(&id)?;

    let discussions =
        DatabaseManager::collection::<Discussion>(collections::DISCUSSIONS).await?;
    let existing = discussions
        .find_one(doc! { "_id": oid }, None)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("discussion {} not found", id)))?;
    require_owner(&ctx, &existing)?;

    discussions.delete_one(doc! { "_id": oid }, None).await?;

    Ok(ok(json!({ "deleted": true })))
}

/// POST /api/discussions/:id/replies - any authenticated role may reply.
pub async fn reply(
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let oid = parse_object_id(&id)?;
    let values = required_strings(&payload, &["content"])?;

    let reply = Reply {
        author: ctx.email.clone(),
        role: ctx.role.as_str().to_string(),
        content: values[0].clone(),
        created_at: now_rfc3339(),
    };
    let reply_bson = bson::to_bson(&reply)
        .map_err(|e| ApiError::from(DatabaseError::Serialization(e.to_string())))?;

    let discussions =
        DatabaseManager::collection::<Discussion>(collections::DISCUSSIONS).await?;
    let result = discussions
        .update_one(
            doc! { "_id": oid },
            doc! { "$push": { "replies": reply_bson } },
            None,
        )
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found(format!("discussion {} not found", id)));
    }

    Ok(created(json!(reply)))
}
