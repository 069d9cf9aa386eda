//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role tier or
//! account state does not meet the requirement. Use these in route handlers
//! to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sprout_core::error::CoreError;
use sprout_core::roles::ROLE_ADMIN;
use sprout_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the administrator role tier. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role_id != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires an authenticated user whose email address is confirmed.
///
/// Unlike [`RequireAdmin`] this consults the database: confirmation can
/// change after a token was issued, so the token alone is not trusted.
pub struct RequireConfirmed(pub AuthUser);

impl FromRequestParts<AppState> for RequireConfirmed {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let record = UserRepo::find_by_id(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
            })?;

        if !record.email_confirmed {
            return Err(AppError::Core(CoreError::Forbidden(
                "Email address has not been confirmed".into(),
            )));
        }
        Ok(RequireConfirmed(user))
    }
}
