//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Where patching is supported, an update DTO with all-`Option` fields

pub mod country;
pub mod login_record;
pub mod subscription;
pub mod user;
pub mod user_profile;
