//! The account-registration saga.
//!
//! Registration creates three rows (user, profile, subscription) without a
//! shared database transaction: the subscription provisioner and profile
//! store are modeled as independent collaborators, so atomicity is enforced
//! procedurally. If anything fails after the user row exists, the
//! compensation path deletes whatever satellite rows were created and then
//! the user itself, restoring the pre-registration state before the error is
//! surfaced. The observable outcome is all-or-nothing.

use rand::Rng;
use sprout_core::error::CoreError;
use sprout_core::roles::ROLE_BASIC;
use sprout_core::types::DbId;
use sprout_db::models::user::CreateUser;
use sprout_db::models::user_profile::CreateProfile;
use sprout_db::repositories::{CountryRepo, ProfileRepo, SubscriptionRepo, UserRepo};
use uuid::Uuid;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Validated input to the registration saga.
#[derive(Debug)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub newsletter: bool,
}

/// Outcome of a successful registration.
#[derive(Debug)]
pub struct RegistrationSummary {
    pub user_id: DbId,
    pub username: String,
    pub role_id: DbId,
}

/// Run the registration saga.
///
/// `ip` is the caller's address, used only for best-effort country
/// enrichment of the new profile; geolocation being unreachable never fails
/// a registration.
pub async fn register(
    state: &AppState,
    input: NewAccount,
    ip: &str,
) -> AppResult<RegistrationSummary> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 1. Fast-path duplicate check. The unique constraint on users.username
    //    is the real guarantee; a concurrent insert surfaces as 23505 below
    //    and maps to the same 409.
    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already in use".into(),
        )));
    }

    // 2. Best-effort geolocation. Absorbed on failure.
    let country_id = resolve_country_id(state, ip).await;

    // 3. Create the user row.
    let email_token = Uuid::new_v4().to_string();
    let create = CreateUser {
        username: input.username.clone(),
        password_hash: hash_password(&input.password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
        role_id: ROLE_BASIC,
        email_token: email_token.clone(),
        verification_code: generate_verification_code(),
        newsletter: input.newsletter,
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    // 4 + 5. Profile and subscription depend only on the user id, so they
    //        are issued concurrently.
    let profile_input = CreateProfile {
        user_id: user.id,
        country_id,
    };
    let (profile_result, subscription_result) = tokio::join!(
        ProfileRepo::create(&state.pool, &profile_input),
        SubscriptionRepo::create_default(&state.pool, user.id),
    );

    if let Err(err) = profile_result.and(subscription_result.map(|_| ())) {
        compensate(state, user.id, &user.username).await;
        tracing::error!(username = %user.username, error = %err, "Registration saga failed, rolled back");
        return Err(AppError::Core(CoreError::Internal(
            "Failed to create account".into(),
        )));
    }

    // 6. Welcome email is fire-and-forget; a mail outage must not undo a
    //    completed registration.
    spawn_welcome_email(state, user.username.clone(), email_token);

    Ok(RegistrationSummary {
        user_id: user.id,
        username: user.username,
        role_id: user.role_id,
    })
}

/// Resolve the caller's country and return its row id, or `None` on any
/// failure (lookup error, unknown code, store error).
async fn resolve_country_id(state: &AppState, ip: &str) -> Option<DbId> {
    let resolved = match state.geo.lookup_country(ip).await {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!(ip, error = %err, "Geolocation failed during registration");
            return None;
        }
    };

    match CountryRepo::get_or_create(&state.pool, &resolved.name, Some(&resolved.iso_code)).await {
        Ok(country) => Some(country.id),
        Err(err) => {
            tracing::warn!(country = %resolved.name, error = %err, "Failed to store country record");
            None
        }
    }
}

/// Reverse-order compensation: delete satellite rows first, then the user.
///
/// Each delete is attempted even if another fails; a row that was never
/// created simply deletes zero rows. Failures here are logged -- there is
/// nothing further to unwind.
async fn compensate(state: &AppState, user_id: DbId, username: &str) {
    let (profile_deleted, subscription_deleted) = tokio::join!(
        ProfileRepo::delete_by_user_id(&state.pool, user_id),
        SubscriptionRepo::delete_by_user_id(&state.pool, user_id),
    );

    if let Err(err) = profile_deleted {
        tracing::error!(username, error = %err, "Compensation failed to delete profile");
    }
    if let Err(err) = subscription_deleted {
        tracing::error!(username, error = %err, "Compensation failed to delete subscription");
    }

    if let Err(err) = UserRepo::delete(&state.pool, user_id).await {
        tracing::error!(username, error = %err, "Compensation failed to delete user");
    }
}

/// Send the welcome/confirmation email in a detached task.
fn spawn_welcome_email(state: &AppState, username: String, token: String) {
    let mailer = state.mailer.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_welcome(&username, &token).await {
            tracing::warn!(username, error = %err, "Failed to send welcome email");
        }
    });
}

/// Random 6-digit verification code.
fn generate_verification_code() -> i32 {
    rand::rng().random_range(100_000..=999_999)
}
