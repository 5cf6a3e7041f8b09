//! Request identity and role gating.
//!
//! Callers identify themselves via the `x-user-role` / `x-user-email` headers.
//! This mirrors the source system exactly: the role gate is a string-equality
//! check against a client-supplied header and is NOT a security boundary. The
//! login token is a `base64(email:timestamp)` placeholder and is never
//! verified on later requests.

use std::fmt;
use std::str::FromStr;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const ROLE_HEADER: &str = "x-user-role";
pub const EMAIL_HEADER: &str = "x-user-email";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Faculty,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Faculty => "faculty",
            Role::Student => "student",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "faculty" => Ok(Role::Faculty),
            "student" => Ok(Role::Student),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller identity extracted from request headers.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub role: Role,
    pub email: String,
}

impl RequestContext {
    /// Role gate: compare the caller's role against an allow-list.
    pub fn require(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "{} role is not permitted to perform this operation",
                self.role
            )))
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_role = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::forbidden(format!("missing {} header", ROLE_HEADER)))?;

        let role = raw_role
            .parse::<Role>()
            .map_err(|_| ApiError::forbidden(format!("unknown role: {}", raw_role)))?;

        let email = parts
            .headers
            .get(EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(Self { role, email })
    }
}

/// Hard-coded demo logins, checked before the users collection.
pub struct DemoCredential {
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
    pub name: &'static str,
}

pub const DEMO_CREDENTIALS: &[DemoCredential] = &[
    DemoCredential {
        email: "admin@lms.edu",
        password: "admin123",
        role: Role::Admin,
        name: "Demo Admin",
    },
    DemoCredential {
        email: "faculty@lms.edu",
        password: "faculty123",
        role: Role::Faculty,
        name: "Demo Faculty",
    },
    DemoCredential {
        email: "student@lms.edu",
        password: "student123",
        role: Role::Student,
        name: "Demo Student",
    },
];

pub fn demo_credential(email: &str) -> Option<&'static DemoCredential> {
    DEMO_CREDENTIALS.iter().find(|c| c.email == email)
}

/// Placeholder session token: base64("email:unix_millis"). Not a credential.
pub fn issue_token(email: &str) -> String {
    let stamp = chrono::Utc::now().timestamp_millis();
    STANDARD.encode(format!("{}:{}", email, stamp))
}
