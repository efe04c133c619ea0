//! HTTP-level integration tests for the application workflow, including
//! tolerance of legacy and corrupted applicant record shapes.

mod common;

use axum::http::StatusCode;
use campus_core::roles::{ROLE_STARTUP, ROLE_STUDENT};
use campus_db::models::project::CreateProject;
use campus_db::repositories::ProjectRepo;
use common::{body_json, error_message, get_auth, post_json_auth, put_json_auth, token_for};
use sqlx::PgPool;

async fn seed_project(pool: &PgPool, startup_id: i64) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            startup_id,
            title: "Data pipeline".to_string(),
            description: "Batch ingest".to_string(),
            required_skills: serde_json::json!(["python"]),
            stipend: 3000,
            duration: None,
            deadline: None,
        },
    )
    .await
    .expect("project creation should succeed")
    .id
}

async fn stored_applicants(pool: &PgPool, project_id: i64) -> serde_json::Value {
    ProjectRepo::find_by_id(pool, project_id)
        .await
        .unwrap()
        .expect("project row must exist")
        .applicants
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

/// A first application stores a pending structured record.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_apply_records_pending(pool: PgPool) {
    let startup = common::create_startup(&pool, "owner@campus.test").await;
    let student = common::create_student(&pool, "stu@campus.test").await;
    let project_id = seed_project(&pool, startup.id).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/project/apply/{project_id}"),
        serde_json::json!({}),
        &token_for(student.id, ROLE_STUDENT),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let applicants = stored_applicants(&pool, project_id).await;
    assert_eq!(applicants[0]["student"], student.id);
    assert_eq!(applicants[0]["status"], "pending");
    assert!(applicants[0]["appliedAt"].is_string());
}

/// Re-applying conflicts, even after a rejection.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reapply_conflicts_after_rejection(pool: PgPool) {
    let startup = common::create_startup(&pool, "owner@campus.test").await;
    let student = common::create_student(&pool, "stu@campus.test").await;
    let project_id = seed_project(&pool, startup.id).await;
    let student_token = token_for(student.id, ROLE_STUDENT);
    let apply_uri = format!("/api/v1/project/apply/{project_id}");

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &apply_uri,
        serde_json::json!({}),
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/project/applicants/{project_id}/{}", student.id),
        serde_json::json!({ "status": "rejected" }),
        &token_for(startup.id, ROLE_STARTUP),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        common::build_test_app(pool),
        &apply_uri,
        serde_json::json!({}),
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let message = error_message(response).await;
    assert!(message.contains("already applied"), "got: {message}");
}

/// A stored bare-id record blocks re-application just like a structured one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_apply_conflicts_with_legacy_record(pool: PgPool) {
    let startup = common::create_startup(&pool, "owner@campus.test").await;
    let student = common::create_student(&pool, "stu@campus.test").await;
    let project_id = seed_project(&pool, startup.id).await;
    ProjectRepo::set_applicants(&pool, project_id, &serde_json::json!([student.id]))
        .await
        .unwrap();

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/project/apply/{project_id}"),
        serde_json::json!({}),
        &token_for(student.id, ROLE_STUDENT),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Startups cannot apply.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_apply_requires_student(pool: PgPool) {
    let startup = common::create_startup(&pool, "owner@campus.test").await;
    let project_id = seed_project(&pool, startup.id).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/project/apply/{project_id}"),
        serde_json::json!({}),
        &token_for(startup.id, ROLE_STARTUP),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// applied-projects finds both structured and legacy record shapes.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_applied_projects_matches_both_shapes(pool: PgPool) {
    let startup = common::create_startup(&pool, "owner@campus.test").await;
    let student = common::create_student(&pool, "stu@campus.test").await;
    let structured = seed_project(&pool, startup.id).await;
    let legacy = seed_project(&pool, startup.id).await;
    let unrelated = seed_project(&pool, startup.id).await;

    let student_token = token_for(student.id, ROLE_STUDENT);
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/project/apply/{structured}"),
        serde_json::json!({}),
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    ProjectRepo::set_applicants(&pool, legacy, &serde_json::json!([student.id]))
        .await
        .unwrap();

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/project/applied-projects",
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&structured));
    assert!(ids.contains(&legacy));
    assert!(!ids.contains(&unrelated));
}

// ---------------------------------------------------------------------------
// Applicant listing
// ---------------------------------------------------------------------------

/// Owner-only listing resolves applicants to student summaries; entries
/// that cannot be resolved pass through as their raw stored value.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_applicants_populated(pool: PgPool) {
    let owner = common::create_startup(&pool, "owner@campus.test").await;
    let rival = common::create_startup(&pool, "rival@campus.test").await;
    let student = common::create_student(&pool, "stu@campus.test").await;
    let project_id = seed_project(&pool, owner.id).await;

    let corrupted = serde_json::json!({ "buffer": [0, 1, 2] });
    ProjectRepo::set_applicants(
        &pool,
        project_id,
        &serde_json::json!([
            corrupted,
            { "student": student.id, "status": "pending" },
        ]),
    )
    .await
    .unwrap();

    let uri = format!("/api/v1/project/applicants/{project_id}");
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token_for(rival.id, ROLE_STARTUP),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token_for(owner.id, ROLE_STARTUP),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], corrupted, "unresolvable entry passes through raw");
    assert_eq!(entries[1]["student"]["id"], student.id);
    assert_eq!(entries[1]["student"]["email"], "stu@campus.test");
    assert_eq!(entries[1]["status"], "pending");

    let stored = stored_applicants(&pool, project_id).await;
    assert_eq!(stored[0], corrupted, "corrupted entry must survive in storage");
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// A legacy bare-id record is upgraded in place when a transition touches it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_status_upgrades_legacy(pool: PgPool) {
    let owner = common::create_startup(&pool, "owner@campus.test").await;
    let student = common::create_student(&pool, "stu@campus.test").await;
    let project_id = seed_project(&pool, owner.id).await;
    ProjectRepo::set_applicants(&pool, project_id, &serde_json::json!([student.id]))
        .await
        .unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/project/applicants/{project_id}/{}", student.id),
        serde_json::json!({ "status": "accepted" }),
        &token_for(owner.id, ROLE_STARTUP),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let applicants = stored_applicants(&pool, project_id).await;
    assert_eq!(applicants[0]["student"], student.id);
    assert_eq!(applicants[0]["status"], "accepted");
    assert!(applicants[0]["appliedAt"].is_string());
}

/// An invalid status value is a 400 even when the project does not exist;
/// a valid transition for an absent applicant is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_status_errors(pool: PgPool) {
    let owner = common::create_startup(&pool, "owner@campus.test").await;
    let owner_token = token_for(owner.id, ROLE_STARTUP);
    let project_id = seed_project(&pool, owner.id).await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/project/applicants/9999/1",
        serde_json::json!({ "status": "maybe" }),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/project/applicants/{project_id}/9999"),
        serde_json::json!({ "status": "accepted" }),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
