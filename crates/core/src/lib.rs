//! Shared domain types for the sprout backend.
//!
//! Everything here is dependency-light on purpose: the db, geo, mail, and api
//! crates all build on these aliases, the error taxonomy, and the well-known
//! role/tier constants.

pub mod error;
pub mod roles;
pub mod types;
