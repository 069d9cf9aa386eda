//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sprout_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    /// Login identifier; an email address, unique and case-sensitive.
    pub username: String,
    pub password_hash: String,
    pub role_id: DbId,
    /// False until the email address is confirmed.
    pub is_active: bool,
    pub email_confirmed: bool,
    /// Dual-purpose token: email-confirmation token at creation, reset
    /// verification token during a password-reset cycle. NULL when no
    /// confirmation or reset is outstanding.
    pub email_token: Option<String>,
    /// Random 6-digit code generated at registration for out-of-band
    /// verification flows.
    pub verification_code: i32,
    pub newsletter: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash, no tokens).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub email_confirmed: bool,
    pub newsletter: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            role_id: user.role_id,
            is_active: user.is_active,
            email_confirmed: user.email_confirmed,
            newsletter: user.newsletter,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub email_token: String,
    pub verification_code: i32,
    pub newsletter: bool,
}

/// DTO for partially updating a user. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
    pub newsletter: Option<bool>,
}
