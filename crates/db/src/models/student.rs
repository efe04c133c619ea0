//! Student entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Full student row from the `students` table.
///
/// Contains the password hash and refresh-token hash -- NEVER serialize
/// this to API responses directly. Use [`StudentResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub year: i32,
    pub department: String,
    /// JSON array of skill strings (order-preserving, duplicates allowed).
    pub skills: Value,
    pub about: Option<String>,
    pub resume_url: Option<String>,
    pub profile_picture_url: Option<String>,
    pub refresh_token_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe student representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub year: i32,
    pub department: String,
    pub skills: Value,
    pub about: Option<String>,
    pub resume_url: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            year: s.year,
            department: s.department,
            skills: s.skills,
            about: s.about,
            resume_url: s.resume_url,
            profile_picture_url: s.profile_picture_url,
            created_at: s.created_at,
        }
    }
}

/// Compact student view embedded in applicant listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub year: i32,
    pub department: String,
    pub skills: Value,
    pub resume_url: Option<String>,
}

/// DTO for creating a new student.
#[derive(Debug)]
pub struct CreateStudent {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub year: i32,
    pub department: String,
    pub skills: Value,
}

/// Whitelist patch for a student profile. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentProfile {
    pub name: Option<String>,
    pub skills: Option<Vec<String>>,
    pub about: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
}

impl UpdateStudentProfile {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.skills.is_none()
            && self.about.is_none()
            && self.department.is_none()
            && self.year.is_none()
    }
}
