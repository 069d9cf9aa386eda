//! Handlers for the `/auth` resource: registration, login, email
//! confirmation, and the password-reset workflow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sprout_core::error::CoreError;
use sprout_core::types::{DbId, Timestamp};
use sprout_db::models::login_record::LoginRecord;
use sprout_db::models::user::UserResponse;
use sprout_db::repositories::{LoginRecordRepo, UserRepo};
use uuid::Uuid;
use validator::Validate;

use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::client_ip::ClientIp;
use crate::middleware::rbac::RequireAdmin;
use crate::services::{login_audit, registration};
use crate::state::AppState;

/// Login failure message. Identical for unknown usernames and wrong
/// passwords so the response cannot be used for username enumeration.
const INVALID_CREDENTIALS: &str = "Provided credentials are incorrect";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email-style login identifier.
    #[validate(email)]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    /// Newsletter opt-in; defaults to true like the signup form.
    #[serde(default = "default_newsletter")]
    pub newsletter: bool,
}

fn default_newsletter() -> bool {
    true
}

/// Response body for a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: DbId,
    pub username: String,
    pub role_id: DbId,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Session token lifetime in seconds.
    pub expires_in: i64,
    pub user_id: DbId,
    pub username: String,
    pub role_id: DbId,
    /// The login before this one (for "last seen" display). `None` on the
    /// first ever login.
    pub last_login: Option<Timestamp>,
    pub newsletter: bool,
}

/// Request body for `PATCH /auth/forgot-password/{username}`.
#[derive(Debug, Deserialize)]
pub struct CompleteResetRequest {
    /// The reset token from the email.
    pub token: String,
    /// The new password to assign.
    pub password: String,
}

/// Generic workflow acknowledgement.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Run the registration saga: create user + profile + subscription with
/// compensating rollback on partial failure.
pub async fn register(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let new_account = registration::NewAccount {
        username: input.username,
        password: input.password,
        newsletter: input.newsletter,
    };
    let summary = registration::register(&state, new_account, &ip).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: summary.user_id,
            username: summary.username,
            role_id: summary.role_id,
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Validate credentials and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // 1. Find user by username. Absence and a wrong password are
    //    indistinguishable to the caller.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    // 2. Verify password against the stored Argon2id hash.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    // 3. Issue the session token.
    let access_token = issue_token(user.id, &user.username, user.role_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    // 4. Best-effort audit; never awaited, never fails the login.
    login_audit::spawn_record_login(&state, user.id, ip);

    // 5. Update last_login_at, keeping the previous value for the response.
    let last_login = UserRepo::record_login(&state.pool, user.id).await?;

    Ok(Json(LoginResponse {
        access_token,
        expires_in: state.config.jwt.expiry_mins * 60,
        user_id: user.id,
        username: user.username,
        role_id: user.role_id,
        last_login,
        newsletter: user.newsletter,
    }))
}

/// POST /api/v1/auth/confirm-email/{token}
///
/// Mark the account holding this confirmation token as confirmed and active.
pub async fn confirm_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_email_token(&state.pool, &token)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("email token", &token)))?;

    let updated = UserRepo::confirm_email(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("user", user.id)))?;

    Ok(Json(updated.into()))
}

/// POST /api/v1/auth/forgot-password/{username}
///
/// Start the password-reset workflow: issue a fresh reset token (superseding
/// any outstanding one) and email it to the user. A mail-delivery failure is
/// surfaced -- the caller must know that no email is coming.
pub async fn forgot_password_start(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("user", &username)))?;

    let token = Uuid::new_v4().to_string();
    UserRepo::set_email_token(&state.pool, user.id, &token).await?;

    state
        .mailer
        .send_password_reset(&user.username, &token)
        .await
        .map_err(|e| {
            tracing::error!(username = %user.username, error = %e, "Failed to send password reset email");
            AppError::Core(CoreError::Internal("Failed to send reset email".into()))
        })?;

    Ok(Json(StatusResponse { status: "ok" }))
}

/// PATCH /api/v1/auth/forgot-password/{username}
///
/// Complete the reset: verify the emailed token and store the new password.
/// The stored token is consumed by the password update, so a token can be
/// used at most once.
pub async fn forgot_password_complete(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<CompleteResetRequest>,
) -> AppResult<Json<StatusResponse>> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("user", &username)))?;

    // Exact match against the outstanding token; NULL never matches.
    if user.email_token.as_deref() != Some(input.token.as_str()) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Reset token does not match".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    // Confirmation mail is best-effort; the reset itself already succeeded.
    let mailer = state.mailer.clone();
    let to = user.username.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_password_updated(&to).await {
            tracing::warn!(username = %to, error = %err, "Failed to send password-updated email");
        }
    });

    Ok(Json(StatusResponse { status: "ok" }))
}

/// GET /api/v1/auth/login-records
///
/// List all login audit records. Admin only.
pub async fn list_login_records(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<LoginRecord>>> {
    let records = LoginRecordRepo::list(&state.pool).await?;
    Ok(Json(records))
}
