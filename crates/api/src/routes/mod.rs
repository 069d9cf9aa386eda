pub mod auth;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                    registration saga (public)
/// /auth/login                       login (public)
/// /auth/confirm-email/{token}       confirm email (public)
/// /auth/forgot-password/{username}  start reset (POST) / complete reset (PATCH)
/// /auth/login-records               login audit list (admin only)
///
/// /users/me                         current account (GET, PATCH; requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
}
