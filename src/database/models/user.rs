use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// LMS account record. Passwords are stored as-is (demo system, see login
/// handler) and projected out of every listing response.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub govt_id_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub govt_id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
    /// Free-form records ({degree, institution, year, ...}); the source system
    /// never fixed a shape for these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub academic_records: Vec<Value>,
    pub created_at: String,
}
