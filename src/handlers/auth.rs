//! Login and self-registration.

use axum::http::StatusCode;
use axum::response::Json;
use mongodb::bson::doc;
use serde_json::{json, Value};

use crate::api::format::record_to_api_value;
use crate::auth::{demo_credential, issue_token, Role};
use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::database::collections;
use crate::error::ApiError;

use super::{now_rfc3339, ok, required_strings};

/// POST /api/auth/login
///
/// Plaintext password comparison against the demo-credentials table first,
/// then the users collection. Returns a placeholder token (see `auth`); the
/// token is never checked on later requests, which carry role/email headers.
pub async fn login(Json(payload): Json<Value>) -> Result<Json<Value>, ApiError> {
    let values = required_strings(&payload, &["email", "password"])?;
    let (email, password) = (&values[0], &values[1]);

    if let Some(demo) = demo_credential(email) {
        if demo.password == password {
            tracing::info!(email = %email, "demo login");
            return Ok(ok(json!({
                "token": issue_token(email),
                "user": { "name": demo.name, "email": demo.email, "role": demo.role.as_str() }
            })));
        }
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let users = DatabaseManager::collection::<User>(collections::USERS).await?;
    let user = users.find_one(doc! { "email": email.as_str() }, None).await?;

    match user {
        Some(mut user) if user.password.as_deref() == Some(password.as_str()) => {
            user.password = None;
            tracing::info!(email = %email, role = %user.role, "login");
            Ok(ok(json!({
                "token": issue_token(email),
                "user": record_to_api_value(&user)
            })))
        }
        _ => Err(ApiError::unauthorized("Invalid email or password")),
    }
}

/// POST /api/auth/register - self-registration for any role.
pub async fn register(
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let values = required_strings(&payload, &["name", "email", "password", "role"])?;
    let role: Role = values[3]
        .parse()
        .map_err(|_| ApiError::bad_request(format!("unknown role: {}", values[3])))?;

    let user = super::users::insert_user(&payload, &values[0], &values[1], &values[2], role).await?;
    Ok((StatusCode::CREATED, ok(user)))
}

/// Build a stored user from a creation payload. Shared with the admin user
/// endpoint so both enforce the same insert-time email uniqueness check.
pub(crate) fn user_from_payload(
    payload: &Value,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> User {
    User {
        id: None,
        name: name.to_string(),
        email: email.to_string(),
        password: Some(password.to_string()),
        role: role.as_str().to_string(),
        phone: super::opt_str(payload, "phone"),
        govt_id_type: super::opt_str(payload, "govtIdType"),
        govt_id_number: super::opt_str(payload, "govtIdNumber"),
        interests: super::str_vec(payload, "interests"),
        academic_records: payload
            .get("academicRecords")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        created_at: now_rfc3339(),
    }
}
