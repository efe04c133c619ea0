//! Route definitions for the `/startup` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::startup;
use crate::state::AppState;

/// Logo uploads; 10 MiB is plenty.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Routes mounted at `/startup`.
///
/// ```text
/// GET    /profile/{id}  -> get_profile
/// PUT    /update/{id}   -> update_profile
/// POST   /upload-logo   -> upload_logo (multipart)
/// DELETE /delete/{id}   -> delete_account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile/{id}", get(startup::get_profile))
        .route("/update/{id}", put(startup::update_profile))
        .route(
            "/upload-logo",
            post(startup::upload_logo).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/delete/{id}", delete(startup::delete_account))
}
