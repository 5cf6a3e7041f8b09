//! One handler module per resource. Every handler follows the same shape:
//! read the caller context from headers, gate by role, validate required
//! fields, hit storage, and wrap the result in the `{success, data}` envelope.

pub mod assignments;
pub mod auth;
pub mod content;
pub mod courses;
pub mod discussions;
pub mod explain;
pub mod tasks;
pub mod users;

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::Json;
use mongodb::bson::{self, Document};
use serde_json::{json, Value};

use crate::database::manager::DatabaseError;
use crate::error::ApiError;

/// Success envelope.
pub(crate) fn ok(data: Value) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Success envelope for freshly created records.
pub(crate) fn created(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, ok(data))
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Pull a set of required, non-empty string fields out of a JSON payload,
/// reporting every missing one at once.
pub(crate) fn required_strings(payload: &Value, fields: &[&str]) -> Result<Vec<String>, ApiError> {
    let mut values = Vec::with_capacity(fields.len());
    let mut missing: HashMap<String, String> = HashMap::new();

    for field in fields {
        match payload.get(*field).and_then(Value::as_str).map(str::trim) {
            Some(v) if !v.is_empty() => values.push(v.to_string()),
            _ => {
                missing.insert((*field).to_string(), "This field is required".to_string());
            }
        }
    }

    if missing.is_empty() {
        Ok(values)
    } else {
        Err(ApiError::validation_error(
            "Missing required fields",
            Some(missing),
        ))
    }
}

pub(crate) fn opt_str(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn str_vec(payload: &Value, field: &str) -> Vec<String> {
    payload
        .get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Build a `$set` document from the payload, restricted to a whitelist of
/// updatable fields. Empty updates are a 400 rather than a silent no-op.
pub(crate) fn set_document(payload: &Value, fields: &[&str]) -> Result<Document, ApiError> {
    let mut set = Document::new();

    for field in fields {
        if let Some(v) = payload.get(*field) {
            let value = bson::to_bson(v)
                .map_err(|e| ApiError::from(DatabaseError::Serialization(e.to_string())))?;
            set.insert(*field, value);
        }
    }

    if set.is_empty() {
        Err(ApiError::bad_request("No updatable fields provided"))
    } else {
        Ok(set)
    }
}
