//! Handlers for project posting and the application workflow.
//!
//! Mutating paths load the project first, run the ownership gate, then
//! apply the change. Applicant-list mutations round-trip through the
//! lifecycle engine in `campus_core::application` so stored legacy and
//! corrupted record shapes survive every write.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::application::{
    apply, decode_applicants, encode_applicants, set_status, ApplicationStatus,
};
use campus_core::authz::ensure_project_owner;
use campus_core::error::CoreError;
use campus_core::project::{validate_deadline, validate_required_text, validate_stipend};
use campus_core::types::{DbId, Timestamp};
use campus_db::models::project::{CreateProject, Project, UpdateProject};
use campus_db::repositories::{ProjectRepo, StartupRepo, StudentRepo};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireStartup, RequireStudent};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /project/create`.
///
/// `stipend` is an `Option` so its absence produces a field-level message
/// instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default, rename = "requiredSkills")]
    pub required_skills: Vec<String>,
    pub stipend: Option<i64>,
    pub duration: Option<String>,
    pub deadline: Option<Timestamp>,
}

/// Request body for `PUT /project/applicants/{project_id}/{student_id}`.
#[derive(Debug, Deserialize)]
pub struct SetApplicantStatusRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/project/create
pub async fn create_project(
    State(state): State<AppState>,
    RequireStartup(auth_user): RequireStartup,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Project>>)> {
    validate_required_text("Title", &input.title)?;
    validate_required_text("Description", &input.description)?;
    let stipend = input
        .stipend
        .ok_or_else(|| CoreError::Validation("Stipend field is required".into()))?;
    validate_stipend(stipend)?;
    if let Some(deadline) = input.deadline {
        validate_deadline(deadline, Utc::now())?;
    }

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            startup_id: auth_user.user_id,
            title: input.title.trim().to_owned(),
            description: input.description.trim().to_owned(),
            required_skills: json!(input.required_skills),
            stipend,
            duration: input.duration,
            deadline: input.deadline,
        },
    )
    .await?;

    // Second half of the two-step write. Not transactional: if this update
    // is lost the project exists but is absent from the owner's posted list.
    let linked =
        StartupRepo::push_posted_project(&state.pool, auth_user.user_id, project.id).await?;
    if !linked {
        tracing::warn!(
            startup_id = auth_user.user_id,
            project_id = project.id,
            "Project created but owner's posted-projects list was not updated"
        );
    }
    tracing::info!(project_id = project.id, startup_id = auth_user.user_id, "Project created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            StatusCode::CREATED,
            project,
            "Project created successfully",
        )),
    ))
}

/// PUT /api/v1/project/update/{id}
pub async fn update_project(
    State(state): State<AppState>,
    RequireStartup(auth_user): RequireStartup,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let project = load_project(&state, id).await?;
    ensure_project_owner(auth_user.user_id, &auth_user.role, project.startup_id)?;

    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one field is required to update".into(),
        )));
    }
    if let Some(status) = &input.status {
        campus_core::project::validate_project_status(status)?;
    }
    if let Some(stipend) = input.stipend {
        validate_stipend(stipend)?;
    }
    if let Some(deadline) = input.deadline {
        validate_deadline(deadline, Utc::now())?;
    }

    let updated = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id,
        })?;
    tracing::info!(project_id = id, "Project updated");

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        updated,
        "Project updated successfully",
    )))
}

/// DELETE /api/v1/project/delete/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    RequireStartup(auth_user): RequireStartup,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let project = load_project(&state, id).await?;
    ensure_project_owner(auth_user.user_id, &auth_user.role, project.startup_id)?;

    let removed = ProjectRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    let unlinked = StartupRepo::pull_posted_project(&state.pool, auth_user.user_id, id).await?;
    if !unlinked {
        tracing::warn!(
            startup_id = auth_user.user_id,
            project_id = id,
            "Project deleted but owner's posted-projects list was not updated"
        );
    }
    tracing::info!(project_id = id, "Project deleted");

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        json!({}),
        "Project deleted successfully",
    )))
}

/// GET /api/v1/project/all-projects
///
/// Public: the project board is browsable without an account.
pub async fn list_projects(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_all(&state.pool).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        projects,
        "Projects fetched successfully",
    )))
}

/// GET /api/v1/project/my-projects
pub async fn my_projects(
    State(state): State<AppState>,
    RequireStartup(auth_user): RequireStartup,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let projects = ProjectRepo::find_by_owner(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        projects,
        "Projects fetched successfully",
    )))
}

/// GET /api/v1/project/{id}
///
/// Public populated view: the owner reference is resolved to a compact
/// startup summary (or `null` when the owner account is gone) and applicant
/// entries are resolved to student summaries where possible.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let project = load_project(&state, id).await?;

    let startup = StartupRepo::find_summary(&state.pool, project.startup_id).await?;
    let applicants = populate_applicants(&state, &project.applicants).await?;

    let mut body = json!(project);
    body["startup"] = json!(startup);
    body["applicants"] = Value::Array(applicants);

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        body,
        "Project fetched successfully",
    )))
}

// ---------------------------------------------------------------------------
// Application workflow
// ---------------------------------------------------------------------------

/// POST /api/v1/project/apply/{project_id}
pub async fn apply_to_project(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let project = load_project(&state, project_id).await?;

    let mut records = decode_applicants(&project.applicants);
    apply(&mut records, auth_user.user_id, Utc::now())?;

    let stored = ProjectRepo::set_applicants(&state.pool, project_id, &encode_applicants(&records))
        .await?;
    if !stored {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }
    tracing::info!(
        project_id,
        student_id = auth_user.user_id,
        "Application submitted"
    );

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        json!({}),
        "Applied to project successfully",
    )))
}

/// GET /api/v1/project/applied-projects
pub async fn applied_projects(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let projects = ProjectRepo::find_by_applicant(&state.pool, auth_user.user_id).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        projects,
        "Applied projects fetched successfully",
    )))
}

/// GET /api/v1/project/applicants/{project_id}
///
/// Owner-only populated applicant listing.
pub async fn list_applicants(
    State(state): State<AppState>,
    RequireStartup(auth_user): RequireStartup,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let project = load_project(&state, project_id).await?;
    ensure_project_owner(auth_user.user_id, &auth_user.role, project.startup_id)?;

    let applicants = populate_applicants(&state, &project.applicants).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        Value::Array(applicants),
        "Applicants fetched successfully",
    )))
}

/// PUT /api/v1/project/applicants/{project_id}/{student_id}
///
/// Transition one application's status. The status string is validated
/// before any loading so an invalid value is always a 400, even for a
/// missing project.
pub async fn set_applicant_status(
    State(state): State<AppState>,
    RequireStartup(auth_user): RequireStartup,
    Path((project_id, student_id)): Path<(DbId, DbId)>,
    Json(input): Json<SetApplicantStatusRequest>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let status = ApplicationStatus::parse(&input.status)?;

    let project = load_project(&state, project_id).await?;
    ensure_project_owner(auth_user.user_id, &auth_user.role, project.startup_id)?;

    let mut records = decode_applicants(&project.applicants);
    set_status(&mut records, student_id, status, Utc::now())?;

    let stored = ProjectRepo::set_applicants(&state.pool, project_id, &encode_applicants(&records))
        .await?;
    if !stored {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }
    tracing::info!(
        project_id,
        student_id,
        status = status.as_str(),
        "Application status updated"
    );

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        json!({ "student": student_id, "status": status.as_str() }),
        "Application status updated successfully",
    )))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id,
        })
        .map_err(AppError::from)
}

/// Resolve applicant records to student summaries for a populated view.
///
/// One batched lookup covers every resolvable id. The view keeps the full
/// list: entries that cannot be resolved (corrupted records, or records
/// whose student row is gone) are passed through in their stored shape
/// rather than hidden.
async fn populate_applicants(state: &AppState, raw: &Value) -> AppResult<Vec<Value>> {
    let records = decode_applicants(raw);

    let ids: Vec<DbId> = records.iter().filter_map(|r| r.student_id()).collect();
    let summaries = StudentRepo::find_summaries_by_ids(&state.pool, &ids).await?;

    let mut populated = Vec::with_capacity(records.len());
    for record in &records {
        let resolved = record.student_id().and_then(|student_id| {
            let summary = summaries.iter().find(|s| s.id == student_id)?;
            let status = record.status()?;

            let mut entry = json!({
                "student": summary,
                "status": status.as_str(),
            });
            if let campus_core::application::ApplicantRecord::Current {
                applied_at: Some(at),
                ..
            } = record
            {
                entry["appliedAt"] = json!(at.to_rfc3339());
            }
            Some(entry)
        });
        populated.push(resolved.unwrap_or_else(|| record.to_value()));
    }

    Ok(populated)
}
