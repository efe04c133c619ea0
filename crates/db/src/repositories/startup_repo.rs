//! Repository for the `startups` table.

use campus_core::types::DbId;
use serde_json::json;
use sqlx::PgPool;

use crate::models::startup::{CreateStartup, Startup, StartupSummary, UpdateStartupProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, founder_name, description, website, \
                       logo_url, posted_projects, refresh_token_hash, created_at, updated_at";

/// Provides CRUD operations for startups.
pub struct StartupRepo;

impl StartupRepo {
    /// Insert a new startup, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStartup) -> Result<Startup, sqlx::Error> {
        let query = format!(
            "INSERT INTO startups (name, email, password_hash, founder_name, description, website, logo_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Startup>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.founder_name)
            .bind(&input.description)
            .bind(&input.website)
            .bind(&input.logo_url)
            .fetch_one(pool)
            .await
    }

    /// Find a startup by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Startup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM startups WHERE id = $1");
        sqlx::query_as::<_, Startup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a startup by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Startup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM startups WHERE email = $1");
        sqlx::query_as::<_, Startup>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the compact public view of a startup, if it still exists.
    /// Absent owners are possible (account deletion does not cascade).
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StartupSummary>, sqlx::Error> {
        sqlx::query_as::<_, StartupSummary>(
            "SELECT id, name, email, founder_name, logo_url FROM startups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find the startup holding the given refresh-token hash.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<Startup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM startups WHERE refresh_token_hash = $1");
        sqlx::query_as::<_, Startup>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Apply a whitelist profile patch. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStartupProfile,
    ) -> Result<Option<Startup>, sqlx::Error> {
        let query = format!(
            "UPDATE startups SET
                name = COALESCE($2, name),
                founder_name = COALESCE($3, founder_name),
                description = COALESCE($4, description),
                website = COALESCE($5, website),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Startup>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.founder_name)
            .bind(&input.description)
            .bind(&input.website)
            .fetch_optional(pool)
            .await
    }

    /// Record an uploaded logo URL. Returns `true` if a row was updated.
    pub async fn set_logo_url(pool: &PgPool, id: DbId, url: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE startups SET logo_url = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(url)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store or clear the refresh-token hash. Returns `true` if a row was updated.
    pub async fn set_refresh_token_hash(
        pool: &PgPool,
        id: DbId,
        hash: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE startups SET refresh_token_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a project id to the posted-projects list.
    ///
    /// Second half of the create-project two-step write; see
    /// `ProjectRepo::create` callers for the consistency caveat.
    pub async fn push_posted_project(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE startups
             SET posted_projects = posted_projects || $2::jsonb, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(json!([project_id]))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a project id from the posted-projects list.
    pub async fn pull_posted_project(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE startups
             SET posted_projects = (
                 SELECT COALESCE(jsonb_agg(entry), '[]'::jsonb)
                 FROM jsonb_array_elements(posted_projects) AS entry
                 WHERE entry <> $2::jsonb
             ),
             updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(json!(project_id))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a startup account. Returns `true` if a row was removed.
    ///
    /// Owned projects are NOT cascaded; an orphaned owner reference is an
    /// expected state, not an error.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM startups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
