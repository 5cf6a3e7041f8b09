//! POST /api/ai-explain - scrape a best-effort explanation for a topic.

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::explain_service;
use crate::state::AppState;

use super::{ok, opt_str, required_strings};

pub async fn explain(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let values = required_strings(&payload, &["title"])?;
    let content = opt_str(&payload, "content").unwrap_or_default();

    let explanation = explain_service::explain(&state.http, &values[0], &content).await?;

    Ok(ok(json!(explanation)))
}
