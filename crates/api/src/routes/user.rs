//! Route definitions for the `/user` auth surface.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Startup registration carries a logo file; 10 MiB is plenty.
const REGISTRATION_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Routes mounted at `/user`.
///
/// ```text
/// POST /register/student   -> register_student
/// POST /register/startup   -> register_startup (multipart)
/// POST /login              -> login
/// POST /logout             -> logout
/// POST /refresh-token      -> refresh_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/student", post(auth::register_student))
        .route(
            "/register/startup",
            post(auth::register_startup).layer(DefaultBodyLimit::max(REGISTRATION_BODY_LIMIT)),
        )
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/refresh-token", post(auth::refresh_token))
}
