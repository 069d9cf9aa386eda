//! Repository for the `user_profiles` table.

use sprout_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_profile::{CreateProfile, UpdateProfile, UserProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, first_name, last_name, country_id, city_id, created_at, updated_at";

/// Provides CRUD operations for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a profile for a freshly created user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (user_id, country_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(input.user_id)
            .bind(input.country_id)
            .fetch_one(pool)
            .await
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no profile row.
    pub async fn update_by_user_id(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                country_id = COALESCE($4, country_id),
                city_id = COALESCE($5, city_id)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.country_id)
            .bind(input.city_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete the profile belonging to a user. Compensation step for the
    /// registration saga. Returns `true` if a row was deleted.
    pub async fn delete_by_user_id(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
