//! Well-known role and subscription tier constants.
//!
//! Role ids are integer tiers carried on the user row and inside JWT claims.
//! These must match the seed data in `crates/db/migrations`.

use crate::types::DbId;

/// Fresh account, email not yet confirmed.
pub const ROLE_BASIC: DbId = 0;
/// Standard account with a confirmed email address.
pub const ROLE_STANDARD: DbId = 1;
/// Administrator.
pub const ROLE_ADMIN: DbId = 3;

/// Subscription tier assigned to every new account.
pub const DEFAULT_SUBSCRIPTION_TIER: i32 = 0;
