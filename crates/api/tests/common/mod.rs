//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router (full middleware stack) over a
//! per-test database pool, with the media host replaced by an in-memory
//! stub so no test touches the network.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use campus_api::auth::jwt::JwtConfig;
use campus_api::config::{MediaConfig, ServerConfig};
use campus_api::media::{MediaError, MediaStore, UploadedMedia};
use campus_api::router::build_app_router;
use campus_api::state::AppState;

/// Media stub: every upload "succeeds" with a deterministic URL.
pub struct StubMediaStore;

#[async_trait]
impl MediaStore for StubMediaStore {
    async fn upload(
        &self,
        file_name: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadedMedia, MediaError> {
        Ok(UploadedMedia {
            secure_url: format!("https://media.test/{file_name}"),
        })
    }
}

/// Media stub that always fails, for exercising the upload error path.
pub struct FailingMediaStore;

#[async_trait]
impl MediaStore for FailingMediaStore {
    async fn upload(
        &self,
        _file_name: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadedMedia, MediaError> {
        Err(MediaError::MissingUrl)
    }
}

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        media: MediaConfig {
            upload_url: "http://media.invalid/upload".to_string(),
            api_key: None,
        },
    }
}

/// Build the full application router over the given pool, with the media
/// host stubbed out.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_media(pool, Arc::new(StubMediaStore))
}

/// Like [`build_test_app`] but with a caller-supplied media delegate.
pub fn build_test_app_with_media(pool: PgPool, media: Arc<dyn MediaStore>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Create a student row directly, bypassing the registration endpoint.
pub async fn create_student(pool: &PgPool, email: &str) -> campus_db::models::student::Student {
    let hashed =
        campus_api::auth::password::hash_password(TEST_PASSWORD).expect("hashing should succeed");
    campus_db::repositories::StudentRepo::create(
        pool,
        &campus_db::models::student::CreateStudent {
            name: "Test Student".to_string(),
            email: email.to_string(),
            password_hash: hashed,
            year: 2,
            department: "Computer Science".to_string(),
            skills: serde_json::json!(["rust", "sql"]),
        },
    )
    .await
    .expect("student creation should succeed")
}

/// Create a startup row directly, bypassing the registration endpoint.
pub async fn create_startup(pool: &PgPool, email: &str) -> campus_db::models::startup::Startup {
    let hashed =
        campus_api::auth::password::hash_password(TEST_PASSWORD).expect("hashing should succeed");
    campus_db::repositories::StartupRepo::create(
        pool,
        &campus_db::models::startup::CreateStartup {
            name: "Test Startup".to_string(),
            email: email.to_string(),
            password_hash: hashed,
            founder_name: "Test Founder".to_string(),
            description: "We build things".to_string(),
            website: None,
            logo_url: None,
        },
    )
    .await
    .expect("startup creation should succeed")
}

/// Mint an access token for a principal without going through login.
pub fn token_for(id: i64, role: &str) -> String {
    campus_api::auth::jwt::generate_access_token(id, role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a minimal multipart body with a single file part named `file`.
pub async fn post_multipart_file_auth(
    app: Router,
    uri: &str,
    file_name: &str,
    contents: &[u8],
    token: &str,
) -> Response<Body> {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body to completion and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert the uniform error envelope shape and return its message.
pub async fn error_message(response: Response<Body>) -> String {
    let json = body_json(response).await;
    assert_eq!(json["success"], false, "error envelope must set success=false");
    assert!(json["errors"].is_array(), "error envelope must carry errors[]");
    json["message"].as_str().unwrap_or_default().to_string()
}

/// Convenience: status code plus parsed body.
pub async fn status_and_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    (status, body_json(response).await)
}
