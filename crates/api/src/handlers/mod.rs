//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the repositories in `sprout_db` and the services in
//! [`crate::services`], mapping errors via [`crate::error::AppError`].

pub mod auth;
pub mod users;
