//! Handlers for registration, login, logout, and token refresh.
//!
//! Students and startups are disjoint principal kinds stored in separate
//! tables, but share one login/refresh surface: both tables are consulted
//! when resolving an email or refresh token. Email uniqueness is enforced
//! jointly across the two tables at registration time.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use campus_core::error::CoreError;
use campus_core::profile::{
    validate_email, validate_startup_description, validate_website, validate_year,
};
use campus_core::project::validate_required_text;
use campus_core::roles::{ROLE_STARTUP, ROLE_STUDENT};
use campus_core::types::DbId;
use campus_db::models::startup::{CreateStartup, Startup, StartupResponse};
use campus_db::models::student::{CreateStudent, Student, StudentResponse};
use campus_db::repositories::{StartupRepo, StudentRepo};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, ACCESS_TOKEN_COOKIE};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Cookie name carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /user/register/student`.
#[derive(Debug, Deserialize)]
pub struct RegisterStudentRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub year: i32,
    pub department: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Request body for `POST /user/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /user/refresh-token` (cookie transport is also
/// accepted).
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Principal resolution
// ---------------------------------------------------------------------------

/// A resolved principal of either kind.
enum Principal {
    Student(Student),
    Startup(Startup),
}

impl Principal {
    fn id(&self) -> DbId {
        match self {
            Self::Student(s) => s.id,
            Self::Startup(s) => s.id,
        }
    }

    fn role(&self) -> &'static str {
        match self {
            Self::Student(_) => ROLE_STUDENT,
            Self::Startup(_) => ROLE_STARTUP,
        }
    }

    fn password_hash(&self) -> &str {
        match self {
            Self::Student(s) => &s.password_hash,
            Self::Startup(s) => &s.password_hash,
        }
    }

    /// Public view with credential fields stripped, plus the role tag.
    fn public_json(&self) -> Value {
        let mut user = match self {
            Self::Student(s) => json!(StudentResponse::from(s.clone())),
            Self::Startup(s) => json!(StartupResponse::from(s.clone())),
        };
        user["role"] = json!(self.role());
        user
    }
}

/// Look up a principal by email, checking students first, then startups.
async fn find_by_email(state: &AppState, email: &str) -> AppResult<Option<Principal>> {
    if let Some(student) = StudentRepo::find_by_email(&state.pool, email).await? {
        return Ok(Some(Principal::Student(student)));
    }
    if let Some(startup) = StartupRepo::find_by_email(&state.pool, email).await? {
        return Ok(Some(Principal::Startup(startup)));
    }
    Ok(None)
}

/// Look up a principal by stored refresh-token hash across both tables.
async fn find_by_refresh_hash(state: &AppState, hash: &str) -> AppResult<Option<Principal>> {
    if let Some(student) = StudentRepo::find_by_refresh_token_hash(&state.pool, hash).await? {
        return Ok(Some(Principal::Student(student)));
    }
    if let Some(startup) = StartupRepo::find_by_refresh_token_hash(&state.pool, hash).await? {
        return Ok(Some(Principal::Startup(startup)));
    }
    Ok(None)
}

/// Fail with Conflict if the email is taken by EITHER kind of principal.
async fn ensure_email_unused(state: &AppState, email: &str) -> AppResult<()> {
    if find_by_email(state, email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User with email already exists".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Token issuance
// ---------------------------------------------------------------------------

/// Generated token pair plus the persisted refresh hash.
struct IssuedTokens {
    access_token: String,
    refresh_token: String,
}

/// Generate an access/refresh pair and persist the refresh hash on the
/// principal row, superseding any previous session.
async fn issue_tokens(state: &AppState, principal: &Principal) -> AppResult<IssuedTokens> {
    let access_token = generate_access_token(principal.id(), principal.role(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let updated = match principal {
        Principal::Student(s) => {
            StudentRepo::set_refresh_token_hash(&state.pool, s.id, Some(&refresh_hash)).await?
        }
        Principal::Startup(s) => {
            StartupRepo::set_refresh_token_hash(&state.pool, s.id, Some(&refresh_hash)).await?
        }
    };
    if !updated {
        return Err(AppError::InternalError(
            "Failed to persist refresh token".into(),
        ));
    }

    Ok(IssuedTokens {
        access_token,
        refresh_token: refresh_plaintext,
    })
}

/// Attach both tokens as HttpOnly/Secure/Strict cookies.
fn with_auth_cookies(jar: CookieJar, tokens: &IssuedTokens) -> CookieJar {
    jar.add(secure_cookie(ACCESS_TOKEN_COOKIE, &tokens.access_token))
        .add(secure_cookie(REFRESH_TOKEN_COOKIE, &tokens.refresh_token))
}

fn secure_cookie(name: &'static str, value: &str) -> Cookie<'static> {
    Cookie::build((name, value.to_owned()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .build()
}

/// Build the `{user, accessToken, refreshToken}` payload returned by
/// registration, login, and refresh.
fn auth_payload(principal: &Principal, tokens: &IssuedTokens) -> Value {
    json!({
        "user": principal.public_json(),
        "accessToken": tokens.access_token,
        "refreshToken": tokens.refresh_token,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/user/register/student
pub async fn register_student(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<RegisterStudentRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<ApiResponse<Value>>)> {
    validate_email(&input.email)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_required_text("Name", &input.name)?;
    validate_required_text("Department", &input.department)?;
    validate_year(input.year)?;

    ensure_email_unused(&state, &input.email).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let student = StudentRepo::create(
        &state.pool,
        &CreateStudent {
            name: input.name.trim().to_owned(),
            email: input.email,
            password_hash,
            year: input.year,
            department: input.department.trim().to_owned(),
            skills: json!(input.skills),
        },
    )
    .await?;
    tracing::info!(student_id = student.id, "Student registered");

    let principal = Principal::Student(student);
    let tokens = issue_tokens(&state, &principal).await?;
    let payload = auth_payload(&principal, &tokens);

    Ok((
        StatusCode::CREATED,
        with_auth_cookies(jar, &tokens),
        Json(ApiResponse::new(
            StatusCode::CREATED,
            payload,
            "Student registered successfully",
        )),
    ))
}

/// POST /api/v1/user/register/startup
///
/// Multipart form: text fields plus an optional `logo` file that is handed
/// to the media host before the row is created.
pub async fn register_startup(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, CookieJar, Json<ApiResponse<Value>>)> {
    let mut name = None;
    let mut email = None;
    let mut password = None;
    let mut founder_name = None;
    let mut description = None;
    let mut website = None;
    let mut logo: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_owned();
        match field_name.as_str() {
            "logo" => {
                let file_name = field.file_name().unwrap_or("logo").to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Logo file not received: {e}")))?;
                logo = Some((file_name, content_type, bytes.to_vec()));
            }
            other => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed field: {e}")))?;
                match other {
                    "name" => name = Some(value),
                    "email" => email = Some(value),
                    "password" => password = Some(value),
                    "founderName" => founder_name = Some(value),
                    "description" => description = Some(value),
                    "website" => website = Some(value),
                    _ => {} // unrecognized fields are ignored
                }
            }
        }
    }

    let email = email.ok_or_else(|| missing_field("email"))?;
    let password = password.ok_or_else(|| missing_field("password"))?;
    let name = name.ok_or_else(|| missing_field("name"))?;
    let founder_name = founder_name.ok_or_else(|| missing_field("founderName"))?;
    let description = description.ok_or_else(|| missing_field("description"))?;

    validate_email(&email)?;
    validate_password_strength(&password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_required_text("Name", &name)?;
    validate_required_text("Founder name", &founder_name)?;
    validate_required_text("Description", &description)?;
    validate_startup_description(&description)?;
    if let Some(site) = &website {
        validate_website(site)?;
    }

    ensure_email_unused(&state, &email).await?;

    let logo_url = match logo {
        Some((file_name, content_type, bytes)) => {
            let uploaded = state.media.upload(&file_name, &content_type, bytes).await?;
            Some(uploaded.secure_url)
        }
        None => None,
    };

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let startup = StartupRepo::create(
        &state.pool,
        &CreateStartup {
            name: name.trim().to_owned(),
            email,
            password_hash,
            founder_name: founder_name.trim().to_owned(),
            description: description.trim().to_owned(),
            website,
            logo_url,
        },
    )
    .await?;
    tracing::info!(startup_id = startup.id, "Startup registered");

    let principal = Principal::Startup(startup);
    let tokens = issue_tokens(&state, &principal).await?;
    let payload = auth_payload(&principal, &tokens);

    Ok((
        StatusCode::CREATED,
        with_auth_cookies(jar, &tokens),
        Json(ApiResponse::new(
            StatusCode::CREATED,
            payload,
            "Startup registered successfully",
        )),
    ))
}

/// POST /api/v1/user/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<ApiResponse<Value>>)> {
    let principal = find_by_email(&state, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, principal.password_hash())
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let tokens = issue_tokens(&state, &principal).await?;
    let payload = auth_payload(&principal, &tokens);

    Ok((
        with_auth_cookies(jar, &tokens),
        Json(ApiResponse::new(
            StatusCode::OK,
            payload,
            "Logged in successfully",
        )),
    ))
}

/// POST /api/v1/user/logout
///
/// Clears the stored refresh token and removes both auth cookies.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<ApiResponse<Value>>)> {
    match auth_user.role.as_str() {
        ROLE_STUDENT => {
            StudentRepo::set_refresh_token_hash(&state.pool, auth_user.user_id, None).await?;
        }
        ROLE_STARTUP => {
            StartupRepo::set_refresh_token_hash(&state.pool, auth_user.user_id, None).await?;
        }
        other => {
            return Err(AppError::Core(CoreError::Unauthorized(format!(
                "Invalid role in token: {other}"
            ))));
        }
    }

    let jar = jar
        .remove(removal_cookie(ACCESS_TOKEN_COOKIE))
        .remove(removal_cookie(REFRESH_TOKEN_COOKIE));

    Ok((
        jar,
        Json(ApiResponse::new(
            StatusCode::OK,
            json!({}),
            "Logged out successfully",
        )),
    ))
}

/// POST /api/v1/user/refresh-token
///
/// Accepts the refresh token from the `refreshToken` cookie or the request
/// body and rotates it: the old token is superseded by a fresh pair.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> AppResult<(CookieJar, Json<ApiResponse<Value>>)> {
    let incoming = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .or_else(|| body.and_then(|Json(b)| b.refresh_token))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Refresh token is required".into()))
        })?;

    let hash = hash_refresh_token(&incoming);
    let principal = find_by_refresh_hash(&state, &hash).await?.ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    })?;

    // Rotation: issuing a new pair overwrites the stored hash, so the token
    // just presented can never be replayed.
    let tokens = issue_tokens(&state, &principal).await?;
    let payload = auth_payload(&principal, &tokens);

    Ok((
        with_auth_cookies(jar, &tokens),
        Json(ApiResponse::new(
            StatusCode::OK,
            payload,
            "Tokens refreshed successfully",
        )),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn missing_field(field: &str) -> AppError {
    AppError::Core(CoreError::Validation(format!("{field} is required")))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}
