//! User subscription entity model.

use serde::Serialize;
use sprout_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Entitlement row from the `user_subscriptions` table, one-to-one with a user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSubscription {
    pub id: DbId,
    pub user_id: DbId,
    /// Entitlement tier; every new account starts at tier 0.
    pub tier: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
