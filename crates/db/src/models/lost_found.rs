//! Lost-and-found report model and DTOs.

use pawhaven_core::pets::PetPhoto;
use pawhaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `lost_found_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LostFoundReport {
    pub id: DbId,
    pub reporter_id: DbId,
    pub report_type: String,
    pub pet_name: Option<String>,
    pub species: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub description: String,
    pub photos: Json<Vec<PetPhoto>>,
    pub last_seen_city: String,
    pub last_seen_state: String,
    pub last_seen_at: Option<Timestamp>,
    pub contact_phone: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a new report.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLostFoundReport {
    pub reporter_id: DbId,
    pub report_type: String,
    pub pet_name: Option<String>,
    pub species: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub description: String,
    pub last_seen_city: String,
    pub last_seen_state: String,
    pub last_seen_at: Option<Timestamp>,
    pub contact_phone: String,
}

/// DTO for updating a report. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLostFoundReport {
    pub pet_name: Option<String>,
    pub description: Option<String>,
    pub last_seen_city: Option<String>,
    pub last_seen_state: Option<String>,
    pub last_seen_at: Option<Timestamp>,
    pub contact_phone: Option<String>,
    pub status: Option<String>,
}

/// Filters accepted by the report list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LostFoundFilter {
    pub report_type: Option<String>,
    pub species: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
}
