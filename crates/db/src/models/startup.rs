//! Startup entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Full startup row from the `startups` table.
///
/// Contains the password hash and refresh-token hash -- NEVER serialize
/// this to API responses directly. Use [`StartupResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct Startup {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub founder_name: String,
    pub description: String,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    /// JSON array of project ids posted by this startup. Maintained by
    /// sequential writes alongside project insert/delete; may briefly drift
    /// from the projects table if the second write fails.
    pub posted_projects: Value,
    pub refresh_token_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe startup representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct StartupResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub founder_name: String,
    pub description: String,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub posted_projects: Value,
    pub created_at: Timestamp,
}

impl From<Startup> for StartupResponse {
    fn from(s: Startup) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
            founder_name: s.founder_name,
            description: s.description,
            website: s.website,
            logo_url: s.logo_url,
            posted_projects: s.posted_projects,
            created_at: s.created_at,
        }
    }
}

/// Compact startup view embedded in project listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StartupSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub founder_name: String,
    pub logo_url: Option<String>,
}

/// DTO for creating a new startup.
#[derive(Debug)]
pub struct CreateStartup {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub founder_name: String,
    pub description: String,
    pub website: Option<String>,
    pub logo_url: Option<String>,
}

/// Whitelist patch for a startup profile. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStartupProfile {
    pub name: Option<String>,
    #[serde(rename = "founderName")]
    pub founder_name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
}

impl UpdateStartupProfile {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.founder_name.is_none()
            && self.description.is_none()
            && self.website.is_none()
    }
}
