//! Route definitions for the `/project` resource.
//!
//! Static segments are registered before the catch-all `/{id}` so paths like
//! `/all-projects` never resolve as an id.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/project`.
///
/// ```text
/// POST   /create                             -> create_project
/// GET    /all-projects                       -> list_projects
/// GET    /my-projects                        -> my_projects
/// GET    /applied-projects                   -> applied_projects
/// POST   /apply/{project_id}                 -> apply_to_project
/// GET    /applicants/{project_id}            -> list_applicants
/// PUT    /applicants/{project_id}/{student_id} -> set_applicant_status
/// PUT    /update/{id}                        -> update_project
/// DELETE /delete/{id}                        -> delete_project
/// GET    /{id}                               -> get_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(project::create_project))
        .route("/all-projects", get(project::list_projects))
        .route("/my-projects", get(project::my_projects))
        .route("/applied-projects", get(project::applied_projects))
        .route("/apply/{project_id}", post(project::apply_to_project))
        .route("/applicants/{project_id}", get(project::list_applicants))
        .route(
            "/applicants/{project_id}/{student_id}",
            put(project::set_applicant_status),
        )
        .route("/update/{id}", put(project::update_project))
        .route("/delete/{id}", delete(project::delete_project))
        .route("/{id}", get(project::get_project))
}
