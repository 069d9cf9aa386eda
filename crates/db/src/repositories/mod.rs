//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod country_repo;
pub mod login_record_repo;
pub mod profile_repo;
pub mod subscription_repo;
pub mod user_repo;

pub use country_repo::{CityRepo, CountryRepo};
pub use login_record_repo::LoginRecordRepo;
pub use profile_repo::ProfileRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
