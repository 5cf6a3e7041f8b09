//! Content items: videos, recordings, and notes, served from one handler
//! set keyed on the path segment (`/api/content/:kind`), the way the three
//! collections share a record shape.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde_json::{json, Value};

use crate::api::format::{record_to_api_value, records_to_api_values};
use crate::auth::{RequestContext, Role};
use crate::database::collections;
use crate::database::manager::DatabaseManager;
use crate::database::models::ContentItem;
use crate::database::parse_object_id;
use crate::error::ApiError;

use super::{created, now_rfc3339, ok, opt_str, required_strings, set_document, str_vec};

const UPDATABLE_FIELDS: &[&str] = &[
    "title",
    "description",
    "course",
    "url",
    "duration",
    "thumbnail",
    "content",
    "topic",
    "fileUrl",
    "assignedTo",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Videos,
    Recordings,
    Notes,
}

impl ContentKind {
    fn from_path(segment: &str) -> Result<Self, ApiError> {
        match segment {
            "videos" => Ok(ContentKind::Videos),
            "recordings" => Ok(ContentKind::Recordings),
            "notes" => Ok(ContentKind::Notes),
            other => Err(ApiError::not_found(format!(
                "unknown content type: {}",
                other
            ))),
        }
    }

    fn collection_name(&self) -> &'static str {
        match self {
            ContentKind::Videos => collections::VIDEOS,
            ContentKind::Recordings => collections::RECORDINGS,
            ContentKind::Notes => collections::NOTES,
        }
    }

    /// Notes require body text; videos and recordings require a media url.
    fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ContentKind::Videos | ContentKind::Recordings => &["title", "course", "url"],
            ContentKind::Notes => &["title", "course", "content"],
        }
    }
}

/// Students only see items assigned to them (or to everyone).
fn visibility_filter(ctx: &RequestContext) -> Document {
    if ctx.role == Role::Student {
        doc! {
            "$or": [
                { "assignedTo": { "$exists": false } },
                { "assignedTo": { "$size": 0 } },
                { "assignedTo": ctx.email.as_str() },
            ]
        }
    } else {
        doc! {}
    }
}

/// GET /api/content/:kind
pub async fn list(ctx: RequestContext, Path(kind): Path<String>) -> Result<Json<Value>, ApiError> {
    let kind = ContentKind::from_path(&kind)?;

    let items = DatabaseManager::collection::<ContentItem>(kind.collection_name()).await?;
    let all: Vec<ContentItem> = items
        .find(visibility_filter(&ctx), None)
        .await?
        .try_collect()
        .await?;

    Ok(ok(json!(records_to_api_values(&all))))
}

/// POST /api/content/:kind
pub async fn create(
    ctx: RequestContext,
    Path(kind): Path<String>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let kind = ContentKind::from_path(&kind)?;
    ctx.require(&[Role::Admin, Role::Faculty])?;

    let values = required_strings(&payload, kind.required_fields())?;

    let mut item = ContentItem {
        id: None,
        title: values[0].clone(),
        course: values[1].clone(),
        description: opt_str(&payload, "description"),
        url: opt_str(&payload, "url"),
        duration: opt_str(&payload, "duration"),
        thumbnail: opt_str(&payload, "thumbnail"),
        content: opt_str(&payload, "content"),
        topic: opt_str(&payload, "topic"),
        file_url: opt_str(&payload, "fileUrl"),
        created_by: ctx.email.clone(),
        assigned_to: str_vec(&payload, "assignedTo"),
        created_at: now_rfc3339(),
    };

    let items = DatabaseManager::collection::<ContentItem>(kind.collection_name()).await?;
    let result = items.insert_one(&item, None).await?;
    item.id = result.inserted_id.as_object_id();

    tracing::info!(kind = ?kind, title = %item.title, "content item created");
    Ok(created(record_to_api_value(&item)))
}

/// PUT /api/content/:kind/:id
pub async fn update(
    ctx: RequestContext,
    Path((kind, id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let kind = ContentKind::from_path(&kind)?;
    ctx.require(&[Role::Admin, Role::Faculty])?;
    let oid = parse_object_id(&id)?;
    let set = set_document(&payload, UPDATABLE_FIELDS)?;

    let items = DatabaseManager::collection::<ContentItem>(kind.collection_name()).await?;
    let result = items
        .update_one(doc! { "_id": oid }, doc! { "$set": set }, None)
        .await?;
    if result.matched_count == 0 {
        return Err(ApiError::not_found(format!("content item {} not found", id)));
    }

    let updated = items
        .find_one(doc! { "_id": oid }, None)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("content item {} not found", id)))?;

    Ok(ok(record_to_api_value(&updated)))
}

/// DELETE /api/content/:kind/:id
pub async fn delete(
    ctx: RequestContext,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let kind = ContentKind::from_path(&kind)?;
    ctx.require(&[Role::Admin, Role::Faculty])?;
    let oid = parse_object_id(&id)?;

    let items = DatabaseManager::collection::<ContentItem>(kind.collection_name()).await?;
    let result = items.delete_one(doc! { "_id": oid }, None).await?;
    if result.deleted_count == 0 {
        return Err(ApiError::not_found(format!("content item {} not found", id)));
    }

    Ok(ok(json!({ "deleted": true })))
}
