//! Repository for the `users` table.

use sprout_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, role_id, is_active, \
                        email_confirmed, email_token, verification_code, \
                        newsletter, last_login_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// New users start unconfirmed and inactive; the email token passed in
    /// `input` is the confirmation token emailed to them.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, role_id, is_active,
                                email_confirmed, email_token, verification_code, newsletter)
             VALUES ($1, $2, $3, false, false, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .bind(&input.email_token)
            .bind(input.verification_code)
            .bind(input.newsletter)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their outstanding email/reset token.
    pub async fn find_by_email_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email_token = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                role_id = COALESCE($2, role_id),
                is_active = COALESCE($3, is_active),
                newsletter = COALESCE($4, newsletter)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(input.role_id)
            .bind(input.is_active)
            .bind(input.newsletter)
            .fetch_optional(pool)
            .await
    }

    /// Mark the account's email as confirmed and activate it.
    ///
    /// Returns the updated row, or `None` if the id does not exist.
    pub async fn confirm_email(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET email_confirmed = true, is_active = true
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the outstanding email/reset token.
    ///
    /// Any previously issued token is invalidated by this write. Returns
    /// `true` if the row was updated.
    pub async fn set_email_token(
        pool: &PgPool,
        id: DbId,
        token: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET email_token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a user's password hash and consume the outstanding reset token.
    ///
    /// Clearing `email_token` in the same statement makes the token
    /// single-use: a replay after a successful reset finds no stored token
    /// to match. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, email_token = NULL WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a successful login: set `last_login_at` to now and return the
    /// previous value (for "last seen" display).
    pub async fn record_login(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let row: (Option<Timestamp>,) = sqlx::query_as(
            "UPDATE users u SET last_login_at = NOW()
             FROM (SELECT id, last_login_at FROM users WHERE id = $1) prev
             WHERE u.id = prev.id
             RETURNING prev.last_login_at",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Delete a user row. Compensation step for the registration saga.
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
