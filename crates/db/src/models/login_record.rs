//! Login audit record model.

use serde::Serialize;
use sprout_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Audit row from the `login_records` table, appended after each successful
/// login. `country_id` is NULL when geolocation was unavailable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LoginRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub ip_address: String,
    pub country_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for appending a login record.
#[derive(Debug)]
pub struct CreateLoginRecord {
    pub user_id: DbId,
    pub ip_address: String,
    pub country_id: Option<DbId>,
}
