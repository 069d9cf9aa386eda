//! Repositories for the `countries` and `cities` reference tables.
//!
//! Both are get-or-create by normalized (lowercased) name so that
//! geolocation enrichment can race without producing duplicates; the unique
//! index on `name` backstops the read-then-write.

use sqlx::PgPool;

use crate::models::country::{City, Country};

const COUNTRY_COLUMNS: &str = "id, name, iso_code, created_at, updated_at";
const CITY_COLUMNS: &str = "id, name, created_at, updated_at";

/// Get-or-create access to country reference rows.
pub struct CountryRepo;

impl CountryRepo {
    /// Find a country by normalized name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Country>, sqlx::Error> {
        let query = format!("SELECT {COUNTRY_COLUMNS} FROM countries WHERE name = $1");
        sqlx::query_as::<_, Country>(&query)
            .bind(name.to_lowercase())
            .fetch_optional(pool)
            .await
    }

    /// Get the country with the given name, creating it if absent.
    ///
    /// Names are lowercased before lookup and storage. The upsert keys on the
    /// unique name index, so concurrent callers converge on one row.
    pub async fn get_or_create(
        pool: &PgPool,
        name: &str,
        iso_code: Option<&str>,
    ) -> Result<Country, sqlx::Error> {
        let query = format!(
            "INSERT INTO countries (name, iso_code)
             VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET iso_code = COALESCE(countries.iso_code, EXCLUDED.iso_code)
             RETURNING {COUNTRY_COLUMNS}"
        );
        sqlx::query_as::<_, Country>(&query)
            .bind(name.to_lowercase())
            .bind(iso_code)
            .fetch_one(pool)
            .await
    }
}

/// Get-or-create access to city reference rows.
pub struct CityRepo;

impl CityRepo {
    /// Get the city with the given name, creating it if absent.
    pub async fn get_or_create(pool: &PgPool, name: &str) -> Result<City, sqlx::Error> {
        let query = format!(
            "INSERT INTO cities (name)
             VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING {CITY_COLUMNS}"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(name.to_lowercase())
            .fetch_one(pool)
            .await
    }
}
