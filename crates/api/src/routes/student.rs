//! Route definitions for the `/student` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::student;
use crate::state::AppState;

/// Resumes and profile pictures; 10 MiB is plenty.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Routes mounted at `/student`.
///
/// ```text
/// GET    /profile/{id}            -> get_profile
/// PUT    /update/{id}             -> update_profile
/// POST   /upload-resume           -> upload_resume (multipart)
/// POST   /upload-profile-picture  -> upload_profile_picture (multipart)
/// DELETE /delete/{id}             -> delete_account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile/{id}", get(student::get_profile))
        .route("/update/{id}", put(student::update_profile))
        .route(
            "/upload-resume",
            post(student::upload_resume).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/upload-profile-picture",
            post(student::upload_profile_picture).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/delete/{id}", delete(student::delete_account))
}
