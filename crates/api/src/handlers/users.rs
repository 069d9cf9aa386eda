//! Handlers for the authenticated `/users/me` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use sprout_core::error::CoreError;
use sprout_db::models::user::{UpdateUser, UserResponse};
use sprout_db::models::user_profile::{UpdateProfile, UserProfile};
use sprout_db::repositories::{CityRepo, ProfileRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireConfirmed;
use crate::state::AppState;

/// The current account plus its profile.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
    pub profile: Option<UserProfile>,
}

/// Request body for `PATCH /users/me`. Every field is optional; absent
/// fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub newsletter: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// City name; stored get-or-create in the shared `cities` table.
    pub city: Option<String>,
}

/// GET /api/v1/users/me
pub async fn get_me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<MeResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("user", auth.user_id)))?;

    let profile = ProfileRepo::find_by_user_id(&state.pool, auth.user_id).await?;

    Ok(Json(MeResponse {
        user: user.into(),
        profile,
    }))
}

/// PATCH /api/v1/users/me
///
/// Partial update of account preferences and profile fields. Requires a
/// confirmed email address. Fields are enumerated explicitly; there is no
/// pass-through of arbitrary payloads.
pub async fn update_me(
    State(state): State<AppState>,
    RequireConfirmed(auth): RequireConfirmed,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<MeResponse>> {
    if input.newsletter.is_some() {
        let update = UpdateUser {
            newsletter: input.newsletter,
            ..UpdateUser::default()
        };
        UserRepo::update(&state.pool, auth.user_id, &update)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("user", auth.user_id)))?;
    }

    if input.first_name.is_some() || input.last_name.is_some() || input.city.is_some() {
        let city_id = match &input.city {
            Some(name) => Some(CityRepo::get_or_create(&state.pool, name).await?.id),
            None => None,
        };
        let update = UpdateProfile {
            first_name: input.first_name,
            last_name: input.last_name,
            city_id,
            ..UpdateProfile::default()
        };
        ProfileRepo::update_by_user_id(&state.pool, auth.user_id, &update).await?;
    }

    get_me(State(state), auth).await
}
