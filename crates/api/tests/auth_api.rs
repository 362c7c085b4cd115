//! HTTP-level integration tests for auth endpoints and RBAC enforcement.
//!
//! Tests cover registration, login, token refresh with rotation, logout,
//! account lockout, and admin user management.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, get_auth, login_token, post_json, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registering a new adopter account returns 201 with tokens and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_creates_user_and_returns_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Sam Adopter",
        "email": "sam@test.com",
        "password": "a-strong-password"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    assert_eq!(json["success"], true);
    assert!(json["data"]["access_token"].is_string());
    assert!(json["data"]["refresh_token"].is_string());
    assert_eq!(json["data"]["user"]["email"], "sam@test.com");
    assert_eq!(json["data"]["user"]["role"], "user");
}

/// Registering with a duplicate email returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_email_is_rejected(pool: PgPool) {
    create_test_user(&pool, "existing", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Someone Else",
        "email": "existing@test.com",
        "password": "a-strong-password"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A too-short password fails declarative validation.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_short_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Sam",
        "email": "sam@test.com",
        "password": "short"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

/// Self-registration as admin is not allowed.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_as_admin_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Wannabe Admin",
        "email": "admin@test.com",
        "password": "a-strong-password",
        "role": "admin"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns tokens and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "loginuser", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "loginuser@test.com", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert!(json["data"]["access_token"].is_string());
    assert!(json["data"]["refresh_token"].is_string());
    assert!(json["data"]["expires_in"].is_number());
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert_eq!(json["data"]["user"]["role"], "user");
}

/// Wrong password returns 401 without revealing which part was wrong.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_returns_401(pool: PgPool) {
    create_test_user(&pool, "wrongpw", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0], "Invalid email or password");
}

/// Unknown email returns the same 401 as a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_email_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "nobody@test.com", "password": "whatever" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Five failed attempts lock the account; the correct password is then
/// rejected until the lock expires.
#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_failures_lock_the_account(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "lockme", "user").await;
    let app = common::build_test_app(pool);

    for _ in 0..5 {
        let body = serde_json::json!({ "email": "lockme@test.com", "password": "bad" });
        let response = post_json(app.clone(), "/api/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let body = serde_json::json!({ "email": "lockme@test.com", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

/// A refresh token can be exchanged once; reuse after rotation fails.
#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "refresher", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "refresher@test.com", "password": password });
    let response = post_json(app.clone(), "/api/auth/login", body).await;
    let json = body_json(response).await;
    let refresh_token = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app.clone(), "/api/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());

    // The old token was revoked by the rotation.
    let response = post_json(app, "/api/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes the refresh token.
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_sessions(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "leaver", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "leaver@test.com", "password": password });
    let response = post_json(app.clone(), "/api/auth/login", body).await;
    let json = body_json(response).await;
    let access_token = json["data"]["access_token"].as_str().unwrap().to_string();
    let refresh_token = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = post_json_auth(
        app.clone(),
        "/api/auth/logout",
        &access_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// GET /auth/me returns the authenticated profile without the password hash.
#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_profile(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "profiled", "shelter").await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "profiled@test.com", &password).await;
    let response = get_auth(app, "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["role"], "shelter");
    assert!(json["data"].get("password_hash").is_none());
}

// ---------------------------------------------------------------------------
// RBAC and admin user management
// ---------------------------------------------------------------------------

/// Requests without a token are rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/adoption/my-applications").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Non-admin users cannot access admin routes.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_routes_reject_non_admins(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "pleb", "user").await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "pleb@test.com", &password).await;
    let response = get_auth(app, "/api/admin/users", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Admins can list users and deactivate an account.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_list_and_update_users(pool: PgPool) {
    let (_admin, admin_password) = create_test_user(&pool, "boss", "admin").await;
    let (target, _) = create_test_user(&pool, "target", "user").await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "boss@test.com", &admin_password).await;

    let response = get_auth(app.clone(), "/api/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);

    let response = put_json_auth(
        app,
        &format!("/api/admin/users/{}", target.id),
        &token,
        serde_json::json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_active"], false);
}

/// An admin cannot deactivate their own account.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_cannot_deactivate_self(pool: PgPool) {
    let (admin, admin_password) = create_test_user(&pool, "selfboss", "admin").await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "selfboss@test.com", &admin_password).await;
    let response = put_json_auth(
        app,
        &format!("/api/admin/users/{}", admin.id),
        &token,
        serde_json::json!({ "is_active": false }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
