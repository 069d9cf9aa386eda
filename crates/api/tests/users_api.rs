//! HTTP-level integration tests for the authenticated `/users/me` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, patch_json_auth, post_empty, post_json};
use sqlx::PgPool;

use sprout_api::auth::jwt::issue_token;
use sprout_db::repositories::UserRepo;

/// Register a user through the API and return a bearer token for them.
async fn register_and_token(pool: &PgPool, username: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "username": username, "password": "a-long-enough-password" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    let config = common::test_config();
    issue_token(
        json["user_id"].as_i64().unwrap(),
        username,
        json["role_id"].as_i64().unwrap(),
        &config.jwt,
    )
    .expect("token issuance should succeed")
}

/// Confirm the user's email through the API, using the token stored at
/// registration.
async fn confirm_email(pool: &PgPool, username: &str) {
    let token = UserRepo::find_by_username(pool, username)
        .await
        .unwrap()
        .unwrap()
        .email_token
        .expect("confirmation token must exist");

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/auth/confirm-email/{token}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// `/users/me` without a token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn get_me_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// `/users/me` returns the account plus its profile, without secrets.
#[sqlx::test(migrations = "../db/migrations")]
async fn get_me_returns_account_and_profile(pool: PgPool) {
    let token = register_and_token(&pool, "ivy@example.com").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["username"], "ivy@example.com");
    assert!(json["profile"].is_object(), "profile row must be attached");
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"].get("email_token").is_none());
}

/// Updating the account before confirming the email address is forbidden.
#[sqlx::test(migrations = "../db/migrations")]
async fn update_me_requires_confirmed_email(pool: PgPool) {
    let token = register_and_token(&pool, "bud@example.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "newsletter": false });
    let response = patch_json_auth(app, "/api/v1/users/me", &token, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Confirming unblocks the same request.
    confirm_email(&pool, "bud@example.com").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "newsletter": false });
    let response = patch_json_auth(app, "/api/v1/users/me", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// PATCH applies only the provided fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn update_me_applies_partial_changes(pool: PgPool) {
    let token = register_and_token(&pool, "moss@example.com").await;
    confirm_email(&pool, "moss@example.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "newsletter": false, "first_name": "Mossy" });
    let response = patch_json_auth(app, "/api/v1/users/me", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["newsletter"], false);
    assert_eq!(json["profile"]["first_name"], "Mossy");
    assert!(json["profile"]["last_name"].is_null(), "untouched field stays");

    // A second patch touching a different field leaves the first intact.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "last_name": "Stone" });
    let response = patch_json_auth(app, "/api/v1/users/me", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["newsletter"], false);
    assert_eq!(json["profile"]["first_name"], "Mossy");
    assert_eq!(json["profile"]["last_name"], "Stone");
}

/// Setting a city stores it get-or-create: two accounts naming the same
/// city converge on one reference row.
#[sqlx::test(migrations = "../db/migrations")]
async fn update_me_city_is_get_or_create(pool: PgPool) {
    let first = register_and_token(&pool, "elm@example.com").await;
    confirm_email(&pool, "elm@example.com").await;
    let second = register_and_token(&pool, "ash@example.com").await;
    confirm_email(&pool, "ash@example.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "city": "Lisbon" });
    let response = patch_json_auth(app, "/api/v1/users/me", &first, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let city_id = json["profile"]["city_id"]
        .as_i64()
        .expect("city_id must be set");

    // Same name, different casing: must resolve to the same row.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "city": "lisbon" });
    let response = patch_json_auth(app, "/api/v1/users/me", &second, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["profile"]["city_id"], city_id);

    let city_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cities")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(city_count.0, 1, "one shared city row expected");
}

/// A garbled bearer token is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn get_me_rejects_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
