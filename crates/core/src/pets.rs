//! Pet domain rules: availability states, attribute validation, and photo
//! list normalization.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_SHELTER};
use crate::types::DbId;

/// Maximum length for a pet description.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// All valid species values accepted at creation time.
pub const VALID_SPECIES: &[&str] = &["dog", "cat", "rabbit", "bird", "reptile", "other"];

/// All valid gender values.
pub const VALID_GENDERS: &[&str] = &["male", "female", "unknown"];

/// All valid size values.
pub const VALID_SIZES: &[&str] = &["small", "medium", "large", "extra_large"];

/// All valid age units.
pub const VALID_AGE_UNITS: &[&str] = &["weeks", "months", "years"];

/// Availability of a pet for adoption.
///
/// Mutated exclusively by the adoption lifecycle commands once an application
/// affects the pet. Maps to the Postgres enum type `pet_availability`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pet_availability", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PetAvailability {
    Available,
    Pending,
    Adopted,
}

impl PetAvailability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Adopted => "adopted",
        }
    }
}

/// A single photo reference on a pet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetPhoto {
    /// Public URL served by the media store.
    pub url: String,
    /// Storage reference id used for deletion.
    pub public_id: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Normalize a photo list so that at most one photo is marked primary.
///
/// The first photo flagged primary wins; if none is flagged and the list is
/// non-empty, the first photo becomes primary. Applied on every photo write
/// so the single-primary invariant holds structurally rather than by
/// handler convention.
pub fn normalize_photos(mut photos: Vec<PetPhoto>) -> Vec<PetPhoto> {
    let primary_idx = photos.iter().position(|p| p.is_primary).unwrap_or(0);
    for (idx, photo) in photos.iter_mut().enumerate() {
        photo.is_primary = idx == primary_idx;
    }
    photos
}

/// Validate that a species string is one of the accepted values.
pub fn validate_species(species: &str) -> Result<(), CoreError> {
    validate_one_of("species", species, VALID_SPECIES)
}

/// Validate that a gender string is one of the accepted values.
pub fn validate_gender(gender: &str) -> Result<(), CoreError> {
    validate_one_of("gender", gender, VALID_GENDERS)
}

/// Validate that a size string is one of the accepted values.
pub fn validate_size(size: &str) -> Result<(), CoreError> {
    validate_one_of("size", size, VALID_SIZES)
}

/// Validate that an age unit string is one of the accepted values.
pub fn validate_age_unit(unit: &str) -> Result<(), CoreError> {
    validate_one_of("age unit", unit, VALID_AGE_UNITS)
}

fn validate_one_of(field: &str, value: &str, valid: &[&str]) -> Result<(), CoreError> {
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            valid.join(", ")
        )))
    }
}

/// May `actor` create, update, or delete a pet owned by `pet_shelter_id`?
///
/// Same resource-scoped rule as application management: admin always,
/// shelter only for its own pets.
pub fn can_manage_pet(actor_id: DbId, actor_role: &str, pet_shelter_id: DbId) -> bool {
    match actor_role {
        ROLE_ADMIN => true,
        ROLE_SHELTER => actor_id == pet_shelter_id,
        _ => false,
    }
}
