//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST  /register                     -> register
/// POST  /login                        -> login
/// POST  /confirm-email/{token}        -> confirm_email
/// POST  /forgot-password/{username}   -> forgot_password_start
/// PATCH /forgot-password/{username}   -> forgot_password_complete
/// GET   /login-records                -> list_login_records (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/confirm-email/{token}", post(auth::confirm_email))
        .route(
            "/forgot-password/{username}",
            post(auth::forgot_password_start).patch(auth::forgot_password_complete),
        )
        .route("/login-records", get(auth::list_login_records))
}
