//! IP-to-country resolution for login auditing and registration enrichment.
//!
//! [`GeoClient`] queries an external lookup service (`https://api.country.is`
//! by default) that maps an IP address to an ISO 3166-1 alpha-2 code, then
//! resolves the code to an English country name via a static table. Callers
//! treat every lookup as best-effort: a failure here must never fail the
//! operation that triggered it.

mod client;
mod countries;

pub use client::{GeoClient, GeoConfig, GeoError, ResolvedCountry};
pub use countries::country_name;
