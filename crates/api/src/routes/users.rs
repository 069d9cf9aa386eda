//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET   /me  -> get_me    (requires auth)
/// PATCH /me  -> update_me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(users::get_me).patch(users::update_me))
}
