//! Adoption application model and DTOs.

use pawhaven_core::adoption::ApplicationStatus;
use pawhaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Full application row from the `adoption_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdoptionApplication {
    pub id: DbId,
    pub pet_id: DbId,
    pub applicant_id: DbId,
    pub reviewer_id: Option<DbId>,
    pub status: ApplicationStatus,
    pub housing_type: String,
    pub has_yard: bool,
    pub has_children: bool,
    pub has_other_pets: bool,
    pub other_pets_details: Option<String>,
    pub work_schedule: String,
    pub experience_with_pets: String,
    pub reason_for_adoption: String,
    #[serde(rename = "references")]
    pub reference_contacts: Json<Vec<String>>,
    pub review_notes: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An application joined with the context needed for authorization and
/// display: the targeted pet's name/owner and the involved user names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationDetail {
    pub id: DbId,
    pub pet_id: DbId,
    pub pet_name: String,
    pub pet_shelter_id: DbId,
    pub applicant_id: DbId,
    pub applicant_name: String,
    pub reviewer_id: Option<DbId>,
    pub reviewer_name: Option<String>,
    pub status: ApplicationStatus,
    pub housing_type: String,
    pub has_yard: bool,
    pub has_children: bool,
    pub has_other_pets: bool,
    pub other_pets_details: Option<String>,
    pub work_schedule: String,
    pub experience_with_pets: String,
    pub reason_for_adoption: String,
    #[serde(rename = "references")]
    pub reference_contacts: Json<Vec<String>>,
    pub review_notes: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Structured application details submitted by the applicant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetails {
    pub housing_type: String,
    #[serde(default)]
    pub has_yard: bool,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub has_other_pets: bool,
    pub other_pets_details: Option<String>,
    pub work_schedule: String,
    pub experience_with_pets: String,
    pub reason_for_adoption: String,
    #[serde(default)]
    pub references: Vec<String>,
}

/// Filters accepted by the application list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub pet: Option<DbId>,
    pub user: Option<DbId>,
}
