//! Repository for the `login_records` audit table.

use sqlx::PgPool;

use crate::models::login_record::{CreateLoginRecord, LoginRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, ip_address, country_id, created_at";

/// Append-only store of successful-login audit entries.
pub struct LoginRecordRepo;

impl LoginRecordRepo {
    /// Append a login record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLoginRecord,
    ) -> Result<LoginRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO login_records (user_id, ip_address, country_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LoginRecord>(&query)
            .bind(input.user_id)
            .bind(&input.ip_address)
            .bind(input.country_id)
            .fetch_one(pool)
            .await
    }

    /// List all login records, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<LoginRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM login_records ORDER BY created_at DESC");
        sqlx::query_as::<_, LoginRecord>(&query)
            .fetch_all(pool)
            .await
    }
}
