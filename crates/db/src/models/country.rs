//! Country and city reference entities.

use serde::Serialize;
use sprout_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Reference row from the `countries` table.
///
/// Names are stored lowercased; get-or-create keys on the normalized name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Country {
    pub id: DbId,
    pub name: String,
    pub iso_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Reference row from the `cities` table. Same normalization rules as
/// [`Country`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct City {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
