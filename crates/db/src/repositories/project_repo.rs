//! Repository for the `projects` table.

use campus_core::types::DbId;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, startup_id, title, description, required_skills, stipend, duration, \
                       deadline, status, applicants, selected_students, created_at, updated_at";

/// Provides CRUD and applicant-list operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row. Status defaults to
    /// `open` and the applicant list starts empty.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (startup_id, title, description, required_skills, stipend, duration, deadline)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.startup_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.required_skills)
            .bind(input.stipend)
            .bind(&input.duration)
            .bind(input.deadline)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects owned by a startup, newest first.
    pub async fn find_by_owner(
        pool: &PgPool,
        startup_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE startup_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(startup_id)
            .fetch_all(pool)
            .await
    }

    /// List all projects, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List projects where the given student appears in the applicant list,
    /// newest first. Matches both the current structured shape and the
    /// legacy bare-id shape via JSONB containment.
    pub async fn find_by_applicant(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE applicants @> $1 OR applicants @> $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(json!([{ "student": student_id }]))
            .bind(json!([student_id]))
            .fetch_all(pool)
            .await
    }

    /// Apply a whitelist patch. Only non-`None` fields are applied; the
    /// owner and applicant list are untouchable through this path.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let skills = input.required_skills.as_ref().map(|s| json!(s));
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                required_skills = COALESCE($4, required_skills),
                stipend = COALESCE($5, stipend),
                duration = COALESCE($6, duration),
                deadline = COALESCE($7, deadline),
                status = COALESCE($8, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(skills)
            .bind(input.stipend)
            .bind(&input.duration)
            .bind(input.deadline)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Write back the full applicant list after an apply or status
    /// transition. Returns `true` if a row was updated.
    ///
    /// Single-document write: the read-modify-write sequence around it is
    /// not atomic, so two concurrent applies from the same student can both
    /// pass the uniqueness check (known, unresolved hazard).
    pub async fn set_applicants(
        pool: &PgPool,
        id: DbId,
        applicants: &Value,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE projects SET applicants = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(applicants)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a project. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
