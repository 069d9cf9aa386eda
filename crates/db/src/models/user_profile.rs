//! User profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use sprout_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Profile row from the `user_profiles` table, one-to-one with a user.
///
/// Geographic fields are denormalized from geolocation at registration time
/// and may be absent if resolution failed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country_id: Option<DbId>,
    pub city_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile alongside a new user.
#[derive(Debug)]
pub struct CreateProfile {
    pub user_id: DbId,
    pub country_id: Option<DbId>,
}

/// DTO for partially updating a profile. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country_id: Option<DbId>,
    pub city_id: Option<DbId>,
}
