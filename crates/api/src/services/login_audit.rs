//! Best-effort login auditing.
//!
//! After a successful login the authenticator spawns [`spawn_record_login`];
//! the task resolves the caller's country, get-or-creates the country row,
//! and appends a login record. Every failure in here is logged and
//! discarded -- the login that triggered the audit has already responded and
//! must never observe an audit error.

use sprout_core::types::DbId;
use sprout_db::models::login_record::CreateLoginRecord;
use sprout_db::repositories::{CountryRepo, LoginRecordRepo};

use crate::state::AppState;

/// Fire-and-forget entry point called by the login handler.
pub fn spawn_record_login(state: &AppState, user_id: DbId, ip: String) {
    let state = state.clone();
    tokio::spawn(async move {
        if let Err(err) = record_login(&state, user_id, &ip).await {
            tracing::warn!(user_id, ip, error = %err, "Failed to create login record");
        }
    });
}

/// Resolve the country behind `ip` and append the audit row.
///
/// Geolocation failure degrades to a record without a country; only a store
/// write failure aborts the audit (and is swallowed by the caller above).
async fn record_login(state: &AppState, user_id: DbId, ip: &str) -> Result<(), sqlx::Error> {
    let country_id = match state.geo.lookup_country(ip).await {
        Ok(resolved) => {
            CountryRepo::get_or_create(&state.pool, &resolved.name, Some(&resolved.iso_code))
                .await
                .map(|country| Some(country.id))?
        }
        Err(err) => {
            tracing::warn!(ip, error = %err, "Geolocation failed during login audit");
            None
        }
    };

    let input = CreateLoginRecord {
        user_id,
        ip_address: ip.to_string(),
        country_id,
    };
    LoginRecordRepo::create(&state.pool, &input).await?;
    Ok(())
}
