//! Handlers for startup profile management.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::authz::ensure_profile_owner;
use campus_core::error::CoreError;
use campus_core::profile::{validate_startup_description, validate_website};
use campus_core::types::DbId;
use campus_db::models::startup::{StartupResponse, UpdateStartupProfile};
use campus_db::repositories::StartupRepo;
use serde_json::{json, Value};

use super::student::read_file_field;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStartup;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/startup/profile/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<StartupResponse>>> {
    let startup = StartupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Startup",
            id,
        })?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        startup.into(),
        "Startup profile fetched successfully",
    )))
}

/// PUT /api/v1/startup/update/{id}
pub async fn update_profile(
    State(state): State<AppState>,
    RequireStartup(auth_user): RequireStartup,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStartupProfile>,
) -> AppResult<Json<ApiResponse<StartupResponse>>> {
    ensure_profile_owner(auth_user.user_id, id)?;

    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one field is required to update".into(),
        )));
    }
    if let Some(description) = &input.description {
        validate_startup_description(description)?;
    }
    if let Some(website) = &input.website {
        validate_website(website)?;
    }

    let startup = StartupRepo::update_profile(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Startup",
            id,
        })?;
    tracing::info!(startup_id = id, "Startup profile updated");

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        startup.into(),
        "Profile updated successfully",
    )))
}

/// POST /api/v1/startup/upload-logo
pub async fn upload_logo(
    State(state): State<AppState>,
    RequireStartup(auth_user): RequireStartup,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Value>>> {
    let (file_name, content_type, bytes) = read_file_field(multipart, "Logo").await?;
    let uploaded = state.media.upload(&file_name, &content_type, bytes).await?;

    let updated =
        StartupRepo::set_logo_url(&state.pool, auth_user.user_id, &uploaded.secure_url).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Startup",
            id: auth_user.user_id,
        }));
    }
    tracing::info!(startup_id = auth_user.user_id, "Logo uploaded");

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        json!({ "logoUrl": uploaded.secure_url }),
        "Logo uploaded successfully",
    )))
}

/// DELETE /api/v1/startup/delete/{id}
///
/// Permanent. Owned projects are NOT removed; their owner references are
/// allowed to dangle and populated views render the owner as absent.
pub async fn delete_account(
    State(state): State<AppState>,
    RequireStartup(auth_user): RequireStartup,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Value>>> {
    ensure_profile_owner(auth_user.user_id, id)?;

    let removed = StartupRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Startup",
            id,
        }));
    }
    tracing::info!(startup_id = id, "Startup account deleted");

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        json!({}),
        "Account deleted successfully",
    )))
}
