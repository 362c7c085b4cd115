//! HTTP-level integration tests for the adoption application lifecycle.
//!
//! These exercise the full stack: routing, RBAC extractors, the capability
//! checks, and the transactional lifecycle commands underneath.

mod common;

use axum::http::StatusCode;
use common::{
    application_details_body, body_json, create_test_pet, create_test_user, get_auth, login_token,
    post_json_auth, put_json_auth,
};
use sqlx::PgPool;

/// Set up a shelter with one pet, an adopter, and their tokens.
///
/// Returns `(app, pet_id, adopter_token, shelter_token)`.
async fn adoption_fixture(pool: &PgPool) -> (axum::Router, i64, String, String) {
    let (shelter, shelter_password) = create_test_user(pool, "shelter1", "shelter").await;
    let (_adopter, adopter_password) = create_test_user(pool, "adopter1", "user").await;
    let pet_id = create_test_pet(pool, shelter.id, "Biscuit").await;

    let app = common::build_test_app(pool.clone());
    let adopter_token = login_token(app.clone(), "adopter1@test.com", &adopter_password).await;
    let shelter_token = login_token(app.clone(), "shelter1@test.com", &shelter_password).await;

    (app, pet_id, adopter_token, shelter_token)
}

fn submit_body(pet_id: i64) -> serde_json::Value {
    serde_json::json!({ "pet": pet_id, "applicationDetails": application_details_body() })
}

/// Fetch a pet's availability status over the API.
async fn pet_status(app: axum::Router, pet_id: i64) -> String {
    let response = common::get(app, &format!("/api/pets/{pet_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["availability_status"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Submitting against an available pet returns 201 and moves the pet to
/// pending.
#[sqlx::test(migrations = "../db/migrations")]
async fn submit_creates_application_and_marks_pet_pending(pool: PgPool) {
    let (app, pet_id, adopter_token, _) = adoption_fixture(&pool).await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["pet_id"], pet_id);
    assert_eq!(json["data"]["references"][0], "Jordan 555-0100");

    assert_eq!(pet_status(app, pet_id).await, "pending");
}

/// A second pending application by the same applicant is a 400 conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_pending_submission_is_rejected(pool: PgPool) {
    let (app, pet_id, adopter_token, _) = adoption_fixture(&pool).await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"][0],
        "You already have a pending application for this pet"
    );
}

/// The pet leaves `available` when the first application lands, so a second
/// applicant fails the availability guard.
#[sqlx::test(migrations = "../db/migrations")]
async fn submission_against_pending_pet_is_rejected(pool: PgPool) {
    let (app, pet_id, adopter_token, _) = adoption_fixture(&pool).await;
    let (_other, other_password) = create_test_user(&pool, "adopter2", "user").await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let other_token = login_token(app.clone(), "adopter2@test.com", &other_password).await;
    let response = post_json_auth(app, "/api/adoption", &other_token, submit_body(pet_id)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Submitting against a missing pet is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn submission_against_missing_pet_is_404(pool: PgPool) {
    let (app, _pet_id, adopter_token, _) = adoption_fixture(&pool).await;

    let response = post_json_auth(app, "/api/adoption", &adopter_token, submit_body(999_999)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Shelters do not submit adoption applications.
#[sqlx::test(migrations = "../db/migrations")]
async fn shelters_cannot_submit_applications(pool: PgPool) {
    let (app, pet_id, _, shelter_token) = adoption_fixture(&pool).await;

    let response = post_json_auth(app, "/api/adoption", &shelter_token, submit_body(pet_id)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// Approval atomically rejects siblings with the fixed note and marks the
/// pet adopted.
#[sqlx::test(migrations = "../db/migrations")]
async fn approval_rejects_siblings_and_marks_pet_adopted(pool: PgPool) {
    let (app, pet_id, adopter_token, shelter_token) = adoption_fixture(&pool).await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    let first = body_json(response).await;
    let first_id = first["data"]["id"].as_i64().unwrap();

    // A second pending application, inserted directly since the pet already
    // left `available`.
    let (second_user, _) = create_test_user(&pool, "rival", "user").await;
    let details: pawhaven_db::models::adoption::ApplicationDetails =
        serde_json::from_value(application_details_body()).unwrap();
    sqlx::query(
        "INSERT INTO adoption_applications
            (pet_id, applicant_id, housing_type, has_yard, has_children, has_other_pets,
             work_schedule, experience_with_pets, reason_for_adoption, reference_contacts)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, '[]'::jsonb)",
    )
    .bind(pet_id)
    .bind(second_user.id)
    .bind(&details.housing_type)
    .bind(details.has_yard)
    .bind(details.has_children)
    .bind(details.has_other_pets)
    .bind(&details.work_schedule)
    .bind(&details.experience_with_pets)
    .bind(&details.reason_for_adoption)
    .execute(&pool)
    .await
    .unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/adoption/{first_id}"),
        &shelter_token,
        serde_json::json!({ "status": "approved", "reviewNotes": "Great fit" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["review_notes"], "Great fit");

    assert_eq!(pet_status(app.clone(), pet_id).await, "adopted");

    // The rival application was mass-rejected with the fixed note.
    let (status, notes): (String, Option<String>) = sqlx::query_as(
        "SELECT status::text, review_notes FROM adoption_applications WHERE applicant_id = $1",
    )
    .bind(second_user.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, "rejected");
    assert_eq!(
        notes.as_deref(),
        Some("Pet has been adopted by another applicant")
    );
}

/// Rejecting the only pending application returns the pet to available.
#[sqlx::test(migrations = "../db/migrations")]
async fn rejecting_sole_application_reopens_pet(pool: PgPool) {
    let (app, pet_id, adopter_token, shelter_token) = adoption_fixture(&pool).await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/adoption/{id}"),
        &shelter_token,
        serde_json::json!({ "status": "rejected", "reviewNotes": "No yard" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pet_status(app, pet_id).await, "available");
}

/// Reviewing a terminal application is a 400 invalid state, not a repeat of
/// the side effects.
#[sqlx::test(migrations = "../db/migrations")]
async fn re_reviewing_is_invalid_state(pool: PgPool) {
    let (app, pet_id, adopter_token, shelter_token) = adoption_fixture(&pool).await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({ "status": "approved" });
    let response = put_json_auth(
        app.clone(),
        &format!("/api/adoption/{id}"),
        &shelter_token,
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response =
        put_json_auth(app, &format!("/api/adoption/{id}"), &shelter_token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A shelter that does not own the targeted pet may not review.
#[sqlx::test(migrations = "../db/migrations")]
async fn non_owning_shelter_cannot_review(pool: PgPool) {
    let (app, pet_id, adopter_token, _) = adoption_fixture(&pool).await;
    let (_other, other_password) = create_test_user(&pool, "shelter2", "shelter").await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let other_token = login_token(app.clone(), "shelter2@test.com", &other_password).await;
    let response = put_json_auth(
        app,
        &format!("/api/adoption/{id}"),
        &other_token,
        serde_json::json!({ "status": "approved" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Queries and visibility
// ---------------------------------------------------------------------------

/// The applicant, the owning shelter, and admins can view an application;
/// an unrelated user cannot.
#[sqlx::test(migrations = "../db/migrations")]
async fn application_visibility_is_scoped(pool: PgPool) {
    let (app, pet_id, adopter_token, shelter_token) = adoption_fixture(&pool).await;
    let (_stranger, stranger_password) = create_test_user(&pool, "stranger", "user").await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/adoption/{id}");

    let response = get_auth(app.clone(), &uri, &adopter_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), &uri, &shelter_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["pet_name"], "Biscuit");
    assert_eq!(json["data"]["applicant_name"], "adopter1");

    let stranger_token = login_token(app.clone(), "stranger@test.com", &stranger_password).await;
    let response = get_auth(app, &uri, &stranger_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Shelter listings only include applications for the shelter's own pets.
#[sqlx::test(migrations = "../db/migrations")]
async fn shelter_listing_is_scoped_to_own_pets(pool: PgPool) {
    let (app, pet_id, adopter_token, shelter_token) = adoption_fixture(&pool).await;

    // A second shelter with its own pet and application.
    let (other_shelter, other_password) = create_test_user(&pool, "shelter2", "shelter").await;
    let other_pet = create_test_pet(&pool, other_shelter.id, "Waffle").await;
    let (_second, second_password) = create_test_user(&pool, "adopter2", "user").await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let second_token = login_token(app.clone(), "adopter2@test.com", &second_password).await;
    let response =
        post_json_auth(app.clone(), "/api/adoption", &second_token, submit_body(other_pet)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(app.clone(), "/api/adoption", &shelter_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["pet_name"], "Biscuit");

    let other_token = login_token(app.clone(), "shelter2@test.com", &other_password).await;
    let response = get_auth(app, "/api/adoption", &other_token).await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["pet_name"], "Waffle");
}

/// my-applications returns the caller's own applications only.
#[sqlx::test(migrations = "../db/migrations")]
async fn my_applications_lists_own_submissions(pool: PgPool) {
    let (app, pet_id, adopter_token, _) = adoption_fixture(&pool).await;

    let response =
        post_json_auth(app.clone(), "/api/adoption", &adopter_token, submit_body(pet_id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(app, "/api/adoption/my-applications", &adopter_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["pet_id"], pet_id);
}
