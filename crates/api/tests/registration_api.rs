//! HTTP-level integration tests for the registration saga and email
//! confirmation.
//!
//! Registration creates three rows (user, profile, subscription) without a
//! shared transaction, so the tests assert the observable all-or-nothing
//! outcome from the database side as well as the HTTP contract.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_empty, post_json};
use sqlx::PgPool;

use sprout_core::roles::{DEFAULT_SUBSCRIPTION_TIER, ROLE_BASIC};
use sprout_db::repositories::{ProfileRepo, SubscriptionRepo, UserRepo};

fn register_body(username: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "password": "a-long-enough-password" })
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns 201 and creates user, profile, and
/// subscription rows.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_creates_user_profile_and_subscription(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/api/v1/auth/register", register_body("aloe@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["username"], "aloe@example.com");
    assert_eq!(json["role_id"], ROLE_BASIC);
    let user_id = json["user_id"].as_i64().expect("user_id should be a number");

    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.role_id, ROLE_BASIC);
    assert!(!user.is_active, "account starts inactive until confirmed");
    assert!(!user.email_confirmed);
    assert!(user.email_token.is_some(), "confirmation token must be set");
    assert!((100_000..=999_999).contains(&user.verification_code));
    assert!(user.newsletter, "newsletter defaults to opted-in");

    let profile = ProfileRepo::find_by_user_id(&pool, user_id)
        .await
        .unwrap()
        .expect("profile row must exist");
    // Geolocation is unreachable in tests, so no country was resolved.
    assert_eq!(profile.country_id, None);

    let subscription = SubscriptionRepo::find_by_user_id(&pool, user_id)
        .await
        .unwrap()
        .expect("subscription row must exist");
    assert_eq!(subscription.tier, DEFAULT_SUBSCRIPTION_TIER);
}

/// The response never leaks the password hash or tokens.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_response_contains_no_secrets(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/register", register_body("jade@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json.get("password_hash").is_none());
    assert!(json.get("email_token").is_none());
    assert!(json.get("verification_code").is_none());
}

/// A newly registered user can log in immediately.
#[sqlx::test(migrations = "../db/migrations")]
async fn registered_user_can_log_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/auth/register", register_body("mint@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "username": "mint@example.com",
        "password": "a-long-enough-password",
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Registering a taken username returns 409 and creates nothing new.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_username_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let first = post_json(app, "/api/v1/auth/register", register_body("rose@example.com")).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let second = post_json(app, "/api/v1/auth/register", register_body("rose@example.com")).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let users = UserRepo::list(&pool).await.unwrap();
    assert_eq!(users.len(), 1, "duplicate attempt must not add a row");
}

/// When a collaborator fails mid-saga, compensation removes every row that
/// was created: the observable outcome is all-or-nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn failed_saga_leaves_no_rows(pool: PgPool) {
    // Force the profile step to fail after the user row exists.
    sqlx::query("DROP TABLE user_profiles")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/auth/register", register_body("lily@example.com")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let user = UserRepo::find_by_username(&pool, "lily@example.com")
        .await
        .unwrap();
    assert!(user.is_none(), "compensation must delete the user row");

    let subscription_count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM user_subscriptions")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(subscription_count.0, 0, "no orphaned subscription may remain");
}

/// Explicit newsletter opt-out is honored.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_honors_newsletter_opt_out(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "username": "cactus@example.com",
        "password": "a-long-enough-password",
        "newsletter": false,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let user = UserRepo::find_by_username(&pool, "cactus@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!user.newsletter);
}

/// Usernames must be email-shaped.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/api/v1/auth/register", register_body("not-an-email")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let users = UserRepo::list(&pool).await.unwrap();
    assert!(users.is_empty());
}

/// Passwords below the minimum length are rejected before anything is
/// written.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "username": "short@example.com", "password": "tiny" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let users = UserRepo::list(&pool).await.unwrap();
    assert!(users.is_empty());
}

// ---------------------------------------------------------------------------
// Email confirmation
// ---------------------------------------------------------------------------

/// Confirming with the emailed token activates the account.
#[sqlx::test(migrations = "../db/migrations")]
async fn confirm_email_activates_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/auth/register", register_body("fern@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let user = UserRepo::find_by_username(&pool, "fern@example.com")
        .await
        .unwrap()
        .unwrap();
    let token = user.email_token.expect("token must exist after registration");

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/auth/confirm-email/{token}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["email_confirmed"], true);
    assert_eq!(json["is_active"], true);

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(reloaded.email_confirmed);
    assert!(reloaded.is_active);
}

/// An unknown confirmation token returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn confirm_email_unknown_token_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_empty(app, "/api/v1/auth/confirm-email/no-such-token").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
