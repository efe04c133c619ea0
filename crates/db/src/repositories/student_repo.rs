//! Repository for the `students` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{CreateStudent, Student, StudentSummary, UpdateStudentProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, year, department, skills, about, \
                       resume_url, profile_picture_url, refresh_token_hash, created_at, updated_at";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (name, email, password_hash, year, department, skills)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.year)
            .bind(&input.department)
            .bind(&input.skills)
            .fetch_one(pool)
            .await
    }

    /// Find a student by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a student by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE email = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find the student holding the given refresh-token hash.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE refresh_token_hash = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Fetch compact summaries for a set of student ids. Missing ids are
    /// silently absent from the result.
    pub async fn find_summaries_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<StudentSummary>, sqlx::Error> {
        sqlx::query_as::<_, StudentSummary>(
            "SELECT id, name, email, year, department, skills, resume_url
             FROM students WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Apply a whitelist profile patch. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudentProfile,
    ) -> Result<Option<Student>, sqlx::Error> {
        let skills = input.skills.as_ref().map(|s| serde_json::json!(s));
        let query = format!(
            "UPDATE students SET
                name = COALESCE($2, name),
                skills = COALESCE($3, skills),
                about = COALESCE($4, about),
                department = COALESCE($5, department),
                year = COALESCE($6, year),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(skills)
            .bind(&input.about)
            .bind(&input.department)
            .bind(input.year)
            .fetch_optional(pool)
            .await
    }

    /// Store or clear the refresh-token hash. Returns `true` if a row was updated.
    pub async fn set_refresh_token_hash(
        pool: &PgPool,
        id: DbId,
        hash: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE students SET refresh_token_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record an uploaded resume URL. Returns `true` if a row was updated.
    pub async fn set_resume_url(pool: &PgPool, id: DbId, url: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE students SET resume_url = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(url)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record an uploaded profile picture URL. Returns `true` if a row was updated.
    pub async fn set_profile_picture_url(
        pool: &PgPool,
        id: DbId,
        url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE students SET profile_picture_url = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a student account. Returns `true` if a row was removed.
    ///
    /// Applicant records referencing the student are left in place; they
    /// simply stop resolving when populated.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
