pub mod manager;
pub mod models;

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Collection names, kept in one place so handlers and tests agree.
pub mod collections {
    pub const USERS: &str = "users";
    pub const COURSES: &str = "courses";
    pub const VIDEOS: &str = "videos";
    pub const RECORDINGS: &str = "recordings";
    pub const NOTES: &str = "notes";
    pub const DISCUSSIONS: &str = "discussions";
}

/// Parse a path id into an ObjectId, mapping failures to a 400.
pub fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::bad_request(format!("Invalid record id: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object_id_rejects_garbage() {
        assert!(parse_object_id("not-an-id").is_err());
        assert!(parse_object_id("65f1a2b3c4d5e6f7a8b9c0d1").is_ok());
    }
}
