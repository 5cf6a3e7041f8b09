//! In-memory record types.
//!
//! Tasks and assignments are process-local and non-durable, matching the
//! source system's module-level arrays: they vanish on restart and are not
//! shared across server instances.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Pending,
    Progress,
    Done,
}

impl FromStr for AssignmentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(AssignmentStatus::Pending),
            "Progress" => Ok(AssignmentStatus::Progress),
            "Done" => Ok(AssignmentStatus::Done),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssignmentStatus::Pending => "Pending",
            AssignmentStatus::Progress => "Progress",
            AssignmentStatus::Done => "Done",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub title: String,
    pub course: String,
    pub due_date: String,
    pub status: AssignmentStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub students: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_students: Vec<String>,
    pub due_date: String,
    pub status: String,
}

impl Task {
    /// Whether a student (by email) is on this task.
    pub fn is_assigned_to(&self, email: &str) -> bool {
        self.assigned_to.as_deref() == Some(email)
            || self.assigned_students.iter().any(|s| s == email)
    }
}
