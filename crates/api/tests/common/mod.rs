//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` via
//! [`pawhaven_api::router::build_app_router`], so tests exercise the same
//! middleware stack (CORS, request ID, timeout, panic recovery) that
//! production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pawhaven_api::auth::jwt::JwtConfig;
use pawhaven_api::auth::password::hash_password;
use pawhaven_api::config::ServerConfig;
use pawhaven_api::media::InMemoryMediaStore;
use pawhaven_api::router::build_app_router;
use pawhaven_api::state::AppState;
use pawhaven_db::models::user::CreateUser;
use pawhaven_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        media_bucket: None,
        media_public_base_url: "http://localhost:3000/media".to_string(),
        chatbot_api_url: None,
        chatbot_api_key: None,
    }
}

/// Build the full application router over the given pool, with an
/// in-memory media store and no chatbot upstream.
pub fn build_test_app(pool: PgPool) -> Router {
    let (app, _media) = build_test_app_with_media(pool);
    app
}

/// Like [`build_test_app`], but also returns the media store so tests can
/// observe cascaded photo deletions.
pub fn build_test_app_with_media(pool: PgPool) -> (Router, Arc<InMemoryMediaStore>) {
    let config = test_config();
    let media = Arc::new(InMemoryMediaStore::new(
        config.media_public_base_url.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media: media.clone(),
        chatbot: None,
    };

    (build_app_router(state, &config), media)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should complete")
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should complete")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should complete")
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should complete")
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should complete")
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should complete")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database and return the row plus the
/// plaintext password used.
pub async fn create_test_user(
    pool: &PgPool,
    name: &str,
    role: &str,
) -> (pawhaven_db::models::user::User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{name}@test.com"),
        password_hash: hashed,
        role: role.to_string(),
        phone: None,
        is_verified: true,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in via the API and return the access token.
pub async fn login_token(app: Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}

/// Insert a pet owned by `shelter_id` and return its id.
pub async fn create_test_pet(pool: &PgPool, shelter_id: i64, name: &str) -> i64 {
    let input = pawhaven_db::models::pet::CreatePet {
        name: name.to_string(),
        species: "dog".to_string(),
        breed: "mixed".to_string(),
        age_value: 2,
        age_unit: "years".to_string(),
        gender: "female".to_string(),
        size: "medium".to_string(),
        color: "brown".to_string(),
        description: None,
        vaccinated: true,
        neutered: false,
        special_needs: false,
        good_with_children: true,
        good_with_dogs: true,
        good_with_cats: false,
        city: "Austin".to_string(),
        state: "TX".to_string(),
        shelter_id,
    };
    pawhaven_db::repositories::PetRepo::create(pool, &input)
        .await
        .expect("pet creation should succeed")
        .id
}

/// A filled-out application details body (camelCase wire form).
pub fn application_details_body() -> serde_json::Value {
    serde_json::json!({
        "housingType": "house",
        "hasYard": true,
        "hasChildren": false,
        "hasOtherPets": false,
        "workSchedule": "remote",
        "experienceWithPets": "Grew up with dogs",
        "reasonForAdoption": "Looking for a companion",
        "references": ["Jordan 555-0100"]
    })
}
