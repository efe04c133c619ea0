pub mod health;
pub mod project;
pub mod startup;
pub mod student;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /user/register/student                   register student (public)
/// /user/register/startup                   register startup (public, multipart)
/// /user/login                              login (public)
/// /user/logout                             logout (requires auth)
/// /user/refresh-token                      rotate token pair (public, token-bearing)
///
/// /student/profile/{id}                    get profile
/// /student/update/{id}                     update own profile (student only)
/// /student/upload-resume                   upload resume (student only)
/// /student/upload-profile-picture          upload picture (student only)
/// /student/delete/{id}                     delete own account (student only)
///
/// /startup/profile/{id}                    get profile
/// /startup/update/{id}                     update own profile (startup only)
/// /startup/upload-logo                     upload logo (startup only)
/// /startup/delete/{id}                     delete own account (startup only)
///
/// /project/create                          create project (startup only)
/// /project/all-projects                    list all projects (public)
/// /project/my-projects                     list own projects (startup only)
/// /project/applied-projects                list applied projects (student only)
/// /project/apply/{project_id}              apply (student only)
/// /project/applicants/{project_id}         list applicants (owner only)
/// /project/applicants/{project_id}/{student_id}  set status (owner only)
/// /project/update/{id}                     update project (owner only)
/// /project/delete/{id}                     delete project (owner only)
/// /project/{id}                            get populated project (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", user::router())
        .nest("/student", student::router())
        .nest("/startup", startup::router())
        .nest("/project", project::router())
}
