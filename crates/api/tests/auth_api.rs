//! HTTP-level integration tests for registration, login, token refresh,
//! logout and password reset.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_auth, post_auth, post_json};
use serde_json::json;
use sqlx::PgPool;

const PASSWORD: &str = "correct-horse-42";

async fn register(pool: &PgPool, body: serde_json::Value) -> axum::response::Response {
    post_json(build_test_app(pool.clone()), "/api/v1/auth/register", body).await
}

async fn login(pool: &PgPool, name: &str, password: &str) -> axum::response::Response {
    post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({ "name": name, "password": password }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_user(pool: PgPool) {
    let response = register(
        &pool,
        json!({
            "name": "  alice  ",
            "email": " alice@example.com ",
            "password": PASSWORD,
            "confirm_password": PASSWORD,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "alice");
    assert_eq!(json["data"]["email"], "alice@example.com");
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_is_a_conflict(pool: PgPool) {
    let body = json!({ "name": "bob", "password": PASSWORD, "confirm_password": PASSWORD });
    assert_eq!(register(&pool, body.clone()).await.status(), StatusCode::CREATED);

    let response = register(&pool, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_bad_input(pool: PgPool) {
    let mismatch = json!({ "name": "carol", "password": PASSWORD, "confirm_password": "other-password" });
    assert_eq!(register(&pool, mismatch).await.status(), StatusCode::BAD_REQUEST);

    let short = json!({ "name": "carol", "password": "short", "confirm_password": "short" });
    assert_eq!(register(&pool, short).await.status(), StatusCode::BAD_REQUEST);

    let missing_name = json!({ "password": PASSWORD, "confirm_password": PASSWORD });
    assert_eq!(register(&pool, missing_name).await.status(), StatusCode::BAD_REQUEST);

    let bad_email = json!({
        "name": "carol",
        "email": "not-an-email",
        "password": PASSWORD,
        "confirm_password": PASSWORD,
    });
    assert_eq!(register(&pool, bad_email).await.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens(pool: PgPool) {
    common::register_and_login(&pool, "dave").await;

    let response = login(&pool, "dave", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 900);
    assert_eq!(json["user"]["name"], "dave");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_failures_are_401(pool: PgPool) {
    common::register_and_login(&pool, "erin").await;

    assert_eq!(
        login(&pool, "erin", "wrong-password").await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        login(&pool, "nobody", PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_token_is_single_use(pool: PgPool) {
    common::register_and_login(&pool, "frank").await;
    let tokens = body_json(login(&pool, "frank", PASSWORD).await).await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap();

    let first = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let rotated = body_json(first).await;
    assert_ne!(rotated["refresh_token"], tokens["refresh_token"]);

    let replay = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    common::register_and_login(&pool, "gina").await;
    let tokens = body_json(login(&pool, "gina", PASSWORD).await).await;
    let access = tokens["access_token"].as_str().unwrap();

    let response = post_auth(build_test_app(pool.clone()), "/api/v1/auth/logout", access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": tokens["refresh_token"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_bearer_token_is_rejected(pool: PgPool) {
    let response = get_auth(build_test_app(pool), "/api/v1/account", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Forgot password
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn forgot_password_resets_by_name(pool: PgPool) {
    common::register_and_login(&pool, "hank").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/forgot-password",
        json!({
            "name": "hank",
            "password": "brand-new-secret",
            "confirm_password": "brand-new-secret",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        login(&pool, "hank", PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        login(&pool, "hank", "brand-new-secret").await.status(),
        StatusCode::OK
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn forgot_password_unknown_name_is_404(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/forgot-password",
        json!({
            "name": "ghost",
            "password": "brand-new-secret",
            "confirm_password": "brand-new-secret",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn forgot_password_checks_confirmation(pool: PgPool) {
    common::register_and_login(&pool, "iris").await;
    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/forgot-password",
        json!({
            "name": "iris",
            "password": "brand-new-secret",
            "confirm_password": "different-secret",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
