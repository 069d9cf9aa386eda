//! Repository for the `user_subscriptions` table.
//!
//! The subscription provisioner consumed by the registration saga: every new
//! account gets a default tier-0 entitlement row.

use sprout_core::roles::DEFAULT_SUBSCRIPTION_TIER;
use sprout_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::UserSubscription;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, tier, created_at, updated_at";

/// Provides CRUD operations for user subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Create the default (tier 0) subscription for a new user.
    pub async fn create_default(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<UserSubscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_subscriptions (user_id, tier)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSubscription>(&query)
            .bind(user_id)
            .bind(DEFAULT_SUBSCRIPTION_TIER)
            .fetch_one(pool)
            .await
    }

    /// Find the subscription belonging to a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserSubscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_subscriptions WHERE user_id = $1");
        sqlx::query_as::<_, UserSubscription>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete the subscription belonging to a user. Compensation step for the
    /// registration saga. Returns `true` if a row was deleted.
    pub async fn delete_by_user_id(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_subscriptions WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
