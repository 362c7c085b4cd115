//! HTTP-level integration tests for the pet listing endpoints and photo
//! management.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    body_json, create_test_pet, create_test_user, delete_auth, get, login_token, post_json_auth,
    put_json_auth,
};
use pawhaven_api::media::MediaStore;
use pawhaven_core::pets::PetPhoto;
use pawhaven_db::repositories::PetRepo;
use sqlx::PgPool;
use tower::ServiceExt;

fn pet_body(name: &str, species: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "species": species,
        "breed": "mixed",
        "age_value": 3,
        "age_unit": "years",
        "gender": "male",
        "size": "large",
        "color": "black",
        "vaccinated": true,
        "neutered": true,
        "special_needs": false,
        "good_with_children": true,
        "good_with_dogs": true,
        "good_with_cats": true,
        "city": "Denver",
        "state": "CO",
        "shelter_id": 0
    })
}

// ---------------------------------------------------------------------------
// Public browsing
// ---------------------------------------------------------------------------

/// The pet list is public and paginated.
#[sqlx::test(migrations = "../db/migrations")]
async fn pet_list_is_public_and_paginated(pool: PgPool) {
    let (shelter, _) = create_test_user(&pool, "shelter1", "shelter").await;
    for i in 0..3 {
        create_test_pet(&pool, shelter.id, &format!("Pet{i}")).await;
    }
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/pets?page=1&limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);
    assert_eq!(json["pagination"]["total"], 3);
    assert_eq!(json["pagination"]["pages"], 2);
    assert_eq!(json["pagination"]["next"], 2);

    let response = get(app, "/api/pets?page=2&limit=2").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["pagination"]["prev"], 1);
}

/// Species and availability filters narrow the listing.
#[sqlx::test(migrations = "../db/migrations")]
async fn pet_list_applies_filters(pool: PgPool) {
    let (shelter, password) = create_test_user(&pool, "shelter1", "shelter").await;
    create_test_pet(&pool, shelter.id, "Dog1").await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "shelter1@test.com", &password).await;
    let response = post_json_auth(app.clone(), "/api/pets", &token, pet_body("Tweety", "bird")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.clone(), "/api/pets?species=bird").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["name"], "Tweety");

    let response = get(app, "/api/pets?status=adopted").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 0);
}

/// Fetching an unknown pet is a 404 with the error envelope.
#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_pet_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/pets/12345").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

// ---------------------------------------------------------------------------
// Shelter-side CRUD
// ---------------------------------------------------------------------------

/// A shelter's new pet is created under its own id, regardless of the body.
#[sqlx::test(migrations = "../db/migrations")]
async fn shelter_creates_pets_under_own_id(pool: PgPool) {
    let (shelter, password) = create_test_user(&pool, "shelter1", "shelter").await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "shelter1@test.com", &password).await;
    let mut body = pet_body("Biscuit", "dog");
    body["shelter_id"] = serde_json::json!(999);

    let response = post_json_auth(app, "/api/pets", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    assert_eq!(json["data"]["shelter_id"], shelter.id);
    assert_eq!(json["data"]["availability_status"], "available");
    assert_eq!(json["data"]["photos"], serde_json::json!([]));
}

/// Adopter accounts cannot create pets.
#[sqlx::test(migrations = "../db/migrations")]
async fn adopters_cannot_create_pets(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "adopter", "user").await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "adopter@test.com", &password).await;
    let response = post_json_auth(app, "/api/pets", &token, pet_body("Nope", "dog")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Enumerated attributes are validated on create.
#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_species_is_rejected(pool: PgPool) {
    let (_shelter, password) = create_test_user(&pool, "shelter1", "shelter").await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "shelter1@test.com", &password).await;
    let response = post_json_auth(app, "/api/pets", &token, pet_body("Rex", "dinosaur")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"][0]
        .as_str()
        .unwrap()
        .contains("Invalid species"));
}

/// Only the owning shelter (or an admin) may update a pet.
#[sqlx::test(migrations = "../db/migrations")]
async fn updates_are_scoped_to_the_owning_shelter(pool: PgPool) {
    let (owner, owner_password) = create_test_user(&pool, "owner", "shelter").await;
    let (_other, other_password) = create_test_user(&pool, "other", "shelter").await;
    let pet_id = create_test_pet(&pool, owner.id, "Biscuit").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "description": "Loves long walks" });
    let uri = format!("/api/pets/{pet_id}");

    let other_token = login_token(app.clone(), "other@test.com", &other_password).await;
    let response = put_json_auth(app.clone(), &uri, &other_token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let owner_token = login_token(app.clone(), "owner@test.com", &owner_password).await;
    let response = put_json_auth(app, &uri, &owner_token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["description"], "Loves long walks");
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// Uploading photos over multipart stores them and makes the first primary.
#[sqlx::test(migrations = "../db/migrations")]
async fn photo_upload_sets_a_single_primary(pool: PgPool) {
    let (shelter, password) = create_test_user(&pool, "shelter1", "shelter").await;
    let pet_id = create_test_pet(&pool, shelter.id, "Biscuit").await;
    let (app, media) = common::build_test_app_with_media(pool);

    let token = login_token(app.clone(), "shelter1@test.com", &password).await;

    let boundary = "pawhaven-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"photo\"; filename=\"a.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         fakejpegbytes\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"photo\"; filename=\"b.png\"\r\n\
         Content-Type: image/png\r\n\r\n\
         fakepngbytes\r\n\
         --{boundary}--\r\n"
    );

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/pets/{pet_id}/photos"))
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let photos = json["data"]["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0]["is_primary"], true);
    assert_eq!(photos[1]["is_primary"], false);
    assert_eq!(media.object_count(), 2);
}

/// Unsupported content types are rejected before touching storage.
#[sqlx::test(migrations = "../db/migrations")]
async fn non_image_upload_is_rejected(pool: PgPool) {
    let (shelter, password) = create_test_user(&pool, "shelter1", "shelter").await;
    let pet_id = create_test_pet(&pool, shelter.id, "Biscuit").await;
    let (app, media) = common::build_test_app_with_media(pool);

    let token = login_token(app.clone(), "shelter1@test.com", &password).await;

    let boundary = "pawhaven-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"doc\"; filename=\"a.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         pdfbytes\r\n\
         --{boundary}--\r\n"
    );

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/pets/{pet_id}/photos"))
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(media.object_count(), 0);
}

/// Deleting a pet cascades the deletion of its stored photos.
#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_pet_removes_its_stored_photos(pool: PgPool) {
    let (shelter, password) = create_test_user(&pool, "shelter1", "shelter").await;
    let pet_id = create_test_pet(&pool, shelter.id, "Biscuit").await;
    let (app, media) = common::build_test_app_with_media(pool.clone());

    let stored = media.upload(vec![1, 2, 3], "image/jpeg").await.unwrap();
    PetRepo::set_photos(
        &pool,
        pet_id,
        &[PetPhoto {
            url: stored.url,
            public_id: stored.public_id,
            is_primary: true,
        }],
    )
    .await
    .unwrap();
    assert_eq!(media.object_count(), 1);

    let token = login_token(app.clone(), "shelter1@test.com", &password).await;
    let response = delete_auth(app.clone(), &format!("/api/pets/{pet_id}"), &token).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(media.object_count(), 0);

    let response = get(app, &format!("/api/pets/{pet_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
