//! Role-gating extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose principal
//! kind does not match, enforcing the authorization gate's kind checks at
//! the type level. Ownership checks still happen in handlers, after the
//! target entity is loaded.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campus_core::authz;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a student principal. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn students_only(RequireStudent(user): RequireStudent) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStudent(pub AuthUser);

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authz::ensure_student(&user.role)?;
        Ok(RequireStudent(user))
    }
}

/// Requires a startup principal. Rejects with 403 Forbidden otherwise.
pub struct RequireStartup(pub AuthUser);

impl FromRequestParts<AppState> for RequireStartup {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authz::ensure_startup(&user.role)?;
        Ok(RequireStartup(user))
    }
}
