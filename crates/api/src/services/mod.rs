//! Domain services behind the auth handlers.
//!
//! `registration` drives the multi-entity account-creation saga;
//! `login_audit` appends best-effort login records with geolocation
//! enrichment.

pub mod login_audit;
pub mod registration;
