//! Handlers for the `/pets` resource: public browsing, shelter-side CRUD,
//! and photo management.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use pawhaven_core::error::CoreError;
use pawhaven_core::pets::{
    can_manage_pet, normalize_photos, validate_age_unit, validate_gender, validate_size,
    validate_species, PetPhoto, MAX_DESCRIPTION_LENGTH,
};
use pawhaven_core::roles::ROLE_SHELTER;
use pawhaven_core::types::DbId;
use pawhaven_db::models::pet::{CreatePet, Pet, PetFilter, UpdatePet};
use pawhaven_db::repositories::PetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireShelter;
use crate::query::PageParams;
use crate::response::{DataResponse, ListResponse, Pagination};
use crate::state::AppState;

/// Maximum accepted photo upload size (5 MiB).
const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for photo uploads.
const ACCEPTED_PHOTO_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Query parameters for the pet list endpoint: filters plus pagination.
#[derive(Debug, Deserialize)]
pub struct PetListParams {
    pub species: Option<String>,
    pub size: Option<String>,
    pub gender: Option<String>,
    pub status: Option<pawhaven_core::pets::PetAvailability>,
    pub city: Option<String>,
    pub shelter: Option<DbId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PetListParams {
    fn split(self) -> (PetFilter, PageParams) {
        (
            PetFilter {
                species: self.species,
                size: self.size,
                gender: self.gender,
                status: self.status,
                city: self.city,
                shelter: self.shelter,
            },
            PageParams {
                page: self.page,
                limit: self.limit,
            },
        )
    }
}

/// GET /api/pets
///
/// Public listing with optional filters and pagination.
pub async fn list_pets(
    State(state): State<AppState>,
    Query(params): Query<PetListParams>,
) -> AppResult<Json<ListResponse<Pet>>> {
    let (filter, page_params) = params.split();
    let (page, limit, offset) = page_params.clamped();

    let pets = PetRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = PetRepo::count(&state.pool, &filter).await?;

    Ok(Json(ListResponse::new(
        pets,
        Pagination::new(total, page, limit),
    )))
}

/// GET /api/pets/{id}
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Pet>>> {
    let pet = PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;
    Ok(Json(DataResponse::new(pet)))
}

/// POST /api/pets
///
/// Create a pet listing. Shelter accounts always create pets under their
/// own id regardless of the `shelter_id` in the body; admins may create a
/// pet for any shelter.
pub async fn create_pet(
    State(state): State<AppState>,
    RequireShelter(auth): RequireShelter,
    Json(mut input): Json<CreatePet>,
) -> AppResult<(StatusCode, Json<DataResponse<Pet>>)> {
    validate_pet_attributes(
        &input.species,
        &input.gender,
        &input.size,
        &input.age_unit,
        input.age_value,
        input.description.as_deref(),
    )?;

    if auth.role == ROLE_SHELTER {
        input.shelter_id = auth.user_id;
    }

    let pet = PetRepo::create(&state.pool, &input).await?;
    tracing::info!(pet_id = pet.id, shelter_id = pet.shelter_id, "Pet created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(pet))))
}

/// PUT /api/pets/{id}
///
/// Update a pet's attributes. Availability is not updatable here; it is
/// owned by the adoption lifecycle.
pub async fn update_pet(
    State(state): State<AppState>,
    RequireShelter(auth): RequireShelter,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePet>,
) -> AppResult<Json<DataResponse<Pet>>> {
    let existing = PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;

    if !can_manage_pet(auth.user_id, &auth.role, existing.shelter_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not manage this pet".into(),
        )));
    }

    if let Some(size) = &input.size {
        validate_size(size)?;
    }
    if let Some(unit) = &input.age_unit {
        validate_age_unit(unit)?;
    }
    if let Some(age) = input.age_value {
        if age < 0 {
            return Err(AppError::Core(CoreError::Validation(
                "age_value must not be negative".into(),
            )));
        }
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }

    let pet = PetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;
    Ok(Json(DataResponse::new(pet)))
}

/// DELETE /api/pets/{id}
///
/// Remove a pet listing and cascade-delete its stored photos. Returns 204.
pub async fn delete_pet(
    State(state): State<AppState>,
    RequireShelter(auth): RequireShelter,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;

    if !can_manage_pet(auth.user_id, &auth.role, existing.shelter_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not manage this pet".into(),
        )));
    }

    let photos = PetRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;

    // Best effort: the database row is already gone, so an orphaned object
    // in storage only costs space. Log and continue.
    for photo in &photos {
        if let Err(e) = state.media.delete(&photo.public_id).await {
            tracing::warn!(pet_id = id, public_id = %photo.public_id, error = %e,
                "Failed to delete pet photo from storage");
        }
    }

    tracing::info!(pet_id = id, "Pet deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/pets/{id}/photos
///
/// Accept a multipart upload of one or more image files and append them to
/// the pet's photo list. The first photo a pet ever receives becomes
/// primary.
pub async fn upload_photos(
    State(state): State<AppState>,
    RequireShelter(auth): RequireShelter,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<Pet>>> {
    let existing = PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;

    if !can_manage_pet(auth.user_id, &auth.role, existing.shelter_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not manage this pet".into(),
        )));
    }

    let mut photos = existing.photos.0;
    let mut uploaded: u32 = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let content_type = field.content_type().unwrap_or("").to_string();
        if !ACCEPTED_PHOTO_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unsupported content type '{content_type}'. Accepted: {}",
                ACCEPTED_PHOTO_TYPES.join(", ")
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if data.len() > MAX_PHOTO_BYTES {
            return Err(AppError::BadRequest(format!(
                "Photo exceeds the maximum size of {MAX_PHOTO_BYTES} bytes"
            )));
        }

        let stored = state
            .media
            .upload(data.to_vec(), &content_type)
            .await
            .map_err(|e| AppError::InternalError(format!("Photo upload failed: {e}")))?;

        photos.push(PetPhoto {
            url: stored.url,
            public_id: stored.public_id,
            is_primary: false,
        });
        uploaded += 1;
    }

    if uploaded == 0 {
        return Err(AppError::BadRequest(
            "No image files received in multipart upload".into(),
        ));
    }

    let photos = normalize_photos(photos);
    let pet = PetRepo::set_photos(&state.pool, id, &photos)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;

    tracing::info!(pet_id = id, count = uploaded, "Pet photos uploaded");
    Ok(Json(DataResponse::new(pet)))
}

/// DELETE /api/pets/{id}/photos/{public_id}
///
/// Remove one photo from a pet and delete the stored object. `public_id`
/// may contain slashes, so the route captures it as a wildcard.
pub async fn delete_photo(
    State(state): State<AppState>,
    RequireShelter(auth): RequireShelter,
    Path((id, public_id)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<Pet>>> {
    let existing = PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;

    if !can_manage_pet(auth.user_id, &auth.role, existing.shelter_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not manage this pet".into(),
        )));
    }

    let mut photos = existing.photos.0;
    let before = photos.len();
    photos.retain(|p| p.public_id != public_id);
    if photos.len() == before {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Pet has no photo '{public_id}'"
        ))));
    }

    let photos = normalize_photos(photos);
    let pet = PetRepo::set_photos(&state.pool, id, &photos)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;

    if let Err(e) = state.media.delete(&public_id).await {
        tracing::warn!(pet_id = id, public_id = %public_id, error = %e,
            "Failed to delete pet photo from storage");
    }

    Ok(Json(DataResponse::new(pet)))
}

/// Validate the enumerated and bounded attributes of a new pet.
fn validate_pet_attributes(
    species: &str,
    gender: &str,
    size: &str,
    age_unit: &str,
    age_value: i32,
    description: Option<&str>,
) -> Result<(), CoreError> {
    validate_species(species)?;
    validate_gender(gender)?;
    validate_size(size)?;
    validate_age_unit(age_unit)?;
    if age_value < 0 {
        return Err(CoreError::Validation(
            "age_value must not be negative".into(),
        ));
    }
    if let Some(description) = description {
        validate_description(description)?;
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "description exceeds the maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}
