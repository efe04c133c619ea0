//! Project entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `applicants` is kept as raw JSON: stored entries may be in the current
/// structured shape, the legacy bare-id shape, or corrupted. Decoding into
/// typed records is the lifecycle engine's job, not the row mapper's.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    /// Owning startup. Immutable after creation.
    pub startup_id: DbId,
    pub title: String,
    pub description: String,
    pub required_skills: Value,
    pub stipend: i64,
    pub duration: Option<String>,
    pub deadline: Option<Timestamp>,
    pub status: String,
    pub applicants: Value,
    pub selected_students: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. Owner comes from the authenticated
/// principal, never from the request body.
#[derive(Debug)]
pub struct CreateProject {
    pub startup_id: DbId,
    pub title: String,
    pub description: String,
    pub required_skills: Value,
    pub stipend: i64,
    pub duration: Option<String>,
    pub deadline: Option<Timestamp>,
}

/// Whitelist patch for a project. All fields are optional; the owner and
/// applicant list are not patchable through this path.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "requiredSkills")]
    pub required_skills: Option<Vec<String>>,
    pub stipend: Option<i64>,
    pub duration: Option<String>,
    pub deadline: Option<Timestamp>,
    pub status: Option<String>,
}

impl UpdateProject {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.required_skills.is_none()
            && self.stipend.is_none()
            && self.duration.is_none()
            && self.deadline.is_none()
            && self.status.is_none()
    }
}
