//! HTTP-level integration tests for student and startup profile management,
//! including media uploads.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use campus_core::roles::{ROLE_STARTUP, ROLE_STUDENT};
use campus_db::repositories::{StartupRepo, StudentRepo};
use common::{
    body_json, delete_auth, get_auth, post_multipart_file_auth, put_json_auth, token_for,
    FailingMediaStore,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Student profiles
// ---------------------------------------------------------------------------

/// Profile reads require auth and never expose credential fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_student_profile(pool: PgPool) {
    let student = common::create_student(&pool, "stu@campus.test").await;
    let viewer = common::create_startup(&pool, "viewer@campus.test").await;
    let uri = format!("/api/v1/student/profile/{}", student.id);

    let response = common::get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Any authenticated principal may view a profile.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token_for(viewer.id, ROLE_STARTUP),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "stu@campus.test");
    assert!(json["data"].get("password_hash").is_none());
    assert!(json["data"].get("refresh_token_hash").is_none());

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/student/profile/9999",
        &token_for(viewer.id, ROLE_STARTUP),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Updates are whitelist patches and only apply to the caller's own row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_student_profile(pool: PgPool) {
    let student = common::create_student(&pool, "stu@campus.test").await;
    let other = common::create_student(&pool, "other@campus.test").await;
    let uri = format!("/api/v1/student/update/{}", student.id);

    let patch = serde_json::json!({ "about": "Rustacean", "skills": ["rust"] });
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        patch.clone(),
        &token_for(other.id, ROLE_STUDENT),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let token = token_for(student.id, ROLE_STUDENT);
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(common::build_test_app(pool.clone()), &uri, patch, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["about"], "Rustacean");
    assert_eq!(json["data"]["skills"], serde_json::json!(["rust"]));
    // Untouched fields survive the patch.
    assert_eq!(json["data"]["department"], "Computer Science");

    // Out-of-range year is rejected.
    let response = put_json_auth(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({ "year": 9 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Resume upload stores the media host URL on the caller's row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_resume(pool: PgPool) {
    let student = common::create_student(&pool, "stu@campus.test").await;
    let token = token_for(student.id, ROLE_STUDENT);

    let response = post_multipart_file_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/student/upload-resume",
        "resume.pdf",
        b"%PDF-1.4 fake",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["resumeUrl"], "https://media.test/resume.pdf");

    let row = StudentRepo::find_by_id(&pool, student.id).await.unwrap().unwrap();
    assert_eq!(row.resume_url.as_deref(), Some("https://media.test/resume.pdf"));
}

/// A media host failure surfaces as a 500 and leaves the row untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_media_failure(pool: PgPool) {
    let student = common::create_student(&pool, "stu@campus.test").await;
    let token = token_for(student.id, ROLE_STUDENT);

    let app = common::build_test_app_with_media(pool.clone(), Arc::new(FailingMediaStore));
    let response = post_multipart_file_auth(
        app,
        "/api/v1/student/upload-profile-picture",
        "me.png",
        b"\x89PNG fake",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let row = StudentRepo::find_by_id(&pool, student.id).await.unwrap().unwrap();
    assert!(row.profile_picture_url.is_none());
}

/// Account deletion removes the row but leaves applicant records dangling.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_student_account(pool: PgPool) {
    let student = common::create_student(&pool, "stu@campus.test").await;
    let token = token_for(student.id, ROLE_STUDENT);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/student/delete/{}", student.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(StudentRepo::find_by_id(&pool, student.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Startup profiles
// ---------------------------------------------------------------------------

/// Startup updates validate the description length cap and website URL.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_startup_profile(pool: PgPool) {
    let startup = common::create_startup(&pool, "start@campus.test").await;
    let token = token_for(startup.id, ROLE_STARTUP);
    let uri = format!("/api/v1/startup/update/{}", startup.id);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "description": "x".repeat(501) }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "website": "not a url" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({ "website": "https://example.com", "founderName": "New Founder" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["website"], "https://example.com");
    assert_eq!(json["data"]["founder_name"], "New Founder");
}

/// Logo upload stores the media host URL on the caller's row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_logo(pool: PgPool) {
    let startup = common::create_startup(&pool, "start@campus.test").await;
    let token = token_for(startup.id, ROLE_STARTUP);

    let response = post_multipart_file_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/startup/upload-logo",
        "logo.svg",
        b"<svg/>",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let row = StartupRepo::find_by_id(&pool, startup.id).await.unwrap().unwrap();
    assert_eq!(row.logo_url.as_deref(), Some("https://media.test/logo.svg"));
}

/// Deleting a startup leaves its projects in place with dangling owners.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_startup_keeps_projects(pool: PgPool) {
    use campus_db::models::project::CreateProject;
    use campus_db::repositories::ProjectRepo;

    let startup = common::create_startup(&pool, "start@campus.test").await;
    let project = ProjectRepo::create(
        &pool,
        &CreateProject {
            startup_id: startup.id,
            title: "Orphan-to-be".to_string(),
            description: "Survives owner deletion".to_string(),
            required_skills: serde_json::json!([]),
            stipend: 0,
            duration: None,
            deadline: None,
        },
    )
    .await
    .unwrap();

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/startup/delete/{}", startup.id),
        &token_for(startup.id, ROLE_STARTUP),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let survivor = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(survivor.startup_id, startup.id);
}
