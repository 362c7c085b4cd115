//! Pet entity model and DTOs.

use pawhaven_core::pets::{PetAvailability, PetPhoto};
use pawhaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Full pet row from the `pets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pet {
    pub id: DbId,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_value: i32,
    pub age_unit: String,
    pub gender: String,
    pub size: String,
    pub color: String,
    pub description: Option<String>,
    pub vaccinated: bool,
    pub neutered: bool,
    pub special_needs: bool,
    pub good_with_children: bool,
    pub good_with_dogs: bool,
    pub good_with_cats: bool,
    pub photos: Json<Vec<PetPhoto>>,
    pub city: String,
    pub state: String,
    pub shelter_id: DbId,
    pub availability_status: PetAvailability,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new pet. Photos are attached separately via the
/// photo-upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePet {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_value: i32,
    pub age_unit: String,
    pub gender: String,
    pub size: String,
    pub color: String,
    pub description: Option<String>,
    pub vaccinated: bool,
    pub neutered: bool,
    pub special_needs: bool,
    pub good_with_children: bool,
    pub good_with_dogs: bool,
    pub good_with_cats: bool,
    pub city: String,
    pub state: String,
    pub shelter_id: DbId,
}

/// DTO for updating an existing pet. Only non-`None` fields are applied.
/// Availability is deliberately absent: it is owned by the adoption
/// lifecycle commands.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePet {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age_value: Option<i32>,
    pub age_unit: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub vaccinated: Option<bool>,
    pub neutered: Option<bool>,
    pub special_needs: Option<bool>,
    pub good_with_children: Option<bool>,
    pub good_with_dogs: Option<bool>,
    pub good_with_cats: Option<bool>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Filters accepted by the pet list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetFilter {
    pub species: Option<String>,
    pub size: Option<String>,
    pub gender: Option<String>,
    pub status: Option<PetAvailability>,
    pub city: Option<String>,
    pub shelter: Option<DbId>,
}
