//! HTTP-level tests for the account profile, settings and deletion.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_subject, delete_auth, get_auth, post_json,
    post_json_auth, put_json_auth, register_and_login,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn account_shows_activity(pool: PgPool) {
    let token = register_and_login(&pool, "alice").await;
    let subject = create_subject(&pool, &token, json!({ "name": "Physics" })).await;
    for (date, status) in [
        ("2026-03-02", "present"),
        ("2026-03-03", "absent"),
        ("2026-03-04", "cancelled"),
    ] {
        post_json_auth(
            build_test_app(pool.clone()),
            "/api/v1/attendance",
            json!({ "subject_id": subject, "date": date, "status": status }),
            &token,
        )
        .await;
    }
    post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/deadlines",
        json!({ "subject_id": subject, "title": "Essay", "due_date": "2026-03-10" }),
        &token,
    )
    .await;

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/account", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["user"]["name"], "alice");
    assert_eq!(data["activity"]["total_subjects"], 1);
    assert_eq!(data["activity"]["total_deadlines"], 1);
    assert_eq!(data["activity"]["total_attendance"], 2);
    assert_eq!(data["activity"]["attendance_trend"], json!([100, 0]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_account_profile(pool: PgPool) {
    let token = register_and_login(&pool, "bob").await;
    register_and_login(&pool, "taken").await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/account",
        json!({ "email": "bob@example.com" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "bob");
    assert_eq!(json["data"]["email"], "bob@example.com");

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/account",
        json!({ "name": "taken" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn settings_default_and_update(pool: PgPool) {
    let token = register_and_login(&pool, "carol").await;

    let json = body_json(get_auth(build_test_app(pool.clone()), "/api/v1/account/settings", &token).await).await;
    assert_eq!(json["data"]["min_attendance"], 75.0);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/account/settings",
        json!({ "min_attendance": 85.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(build_test_app(pool.clone()), "/api/v1/account/settings", &token).await).await;
    assert_eq!(json["data"]["min_attendance"], 85.0);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/account/settings",
        json!({ "min_attendance": 0.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_account_cannot_log_in(pool: PgPool) {
    let token = register_and_login(&pool, "dave").await;
    create_subject(&pool, &token, json!({ "name": "Physics" })).await;

    let response = delete_auth(build_test_app(pool.clone()), "/api/v1/account", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({ "name": "dave", "password": "correct-horse-42" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let subjects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subjects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(subjects, 0);
}
