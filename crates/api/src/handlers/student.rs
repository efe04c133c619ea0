//! Handlers for student profile management.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::authz::ensure_profile_owner;
use campus_core::error::CoreError;
use campus_core::profile::validate_year;
use campus_core::types::DbId;
use campus_db::models::student::{StudentResponse, UpdateStudentProfile};
use campus_db::repositories::StudentRepo;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStudent;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/student/profile/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<StudentResponse>>> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Student",
            id,
        })?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        student.into(),
        "Student profile fetched successfully",
    )))
}

/// PUT /api/v1/student/update/{id}
///
/// Whitelist patch; only the profile's own principal may call it. An empty
/// patch is rejected rather than silently accepted.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudentProfile>,
) -> AppResult<Json<ApiResponse<StudentResponse>>> {
    ensure_profile_owner(auth_user.user_id, id)?;

    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one field is required to update".into(),
        )));
    }
    if let Some(year) = input.year {
        validate_year(year)?;
    }

    let student = StudentRepo::update_profile(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Student",
            id,
        })?;
    tracing::info!(student_id = id, "Student profile updated");

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        student.into(),
        "Profile updated successfully",
    )))
}

/// POST /api/v1/student/upload-resume
///
/// Multipart upload; the file is handed to the media host and the returned
/// durable URL is stored on the authenticated student's row.
pub async fn upload_resume(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Value>>> {
    let (file_name, content_type, bytes) = read_file_field(multipart, "Resume").await?;
    let uploaded = state.media.upload(&file_name, &content_type, bytes).await?;

    let updated =
        StudentRepo::set_resume_url(&state.pool, auth_user.user_id, &uploaded.secure_url).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: auth_user.user_id,
        }));
    }
    tracing::info!(student_id = auth_user.user_id, "Resume uploaded");

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        json!({ "resumeUrl": uploaded.secure_url }),
        "Resume uploaded successfully",
    )))
}

/// POST /api/v1/student/upload-profile-picture
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Value>>> {
    let (file_name, content_type, bytes) = read_file_field(multipart, "Profile picture").await?;
    let uploaded = state.media.upload(&file_name, &content_type, bytes).await?;

    let updated =
        StudentRepo::set_profile_picture_url(&state.pool, auth_user.user_id, &uploaded.secure_url)
            .await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: auth_user.user_id,
        }));
    }
    tracing::info!(student_id = auth_user.user_id, "Profile picture uploaded");

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        json!({ "profilePictureUrl": uploaded.secure_url }),
        "Profile picture uploaded successfully",
    )))
}

/// DELETE /api/v1/student/delete/{id}
///
/// Permanent. Applicant records referencing the student are left in place
/// and simply stop resolving when populated.
pub async fn delete_account(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Value>>> {
    ensure_profile_owner(auth_user.user_id, id)?;

    let removed = StudentRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }));
    }
    tracing::info!(student_id = id, "Student account deleted");

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        json!({}),
        "Account deleted successfully",
    )))
}

/// Pull the first file field out of a multipart body.
///
/// `what` names the expected file in error messages.
pub(crate) async fn read_file_field(
    mut multipart: Multipart,
    what: &str,
) -> AppResult<(String, String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("{what} file not received: {e}")))?;
        return Ok((file_name, content_type, bytes.to_vec()));
    }

    Err(AppError::Core(CoreError::Validation(format!(
        "{what} file is required"
    ))))
}
