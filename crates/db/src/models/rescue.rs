//! Rescue report model and DTOs.

use pawhaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rescue_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RescueReport {
    pub id: DbId,
    pub reporter_id: DbId,
    pub animal_type: String,
    pub description: String,
    pub city: String,
    pub state: String,
    pub urgency: String,
    pub status: String,
    pub assigned_shelter_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a new rescue report.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRescueReport {
    pub reporter_id: DbId,
    pub animal_type: String,
    pub description: String,
    pub city: String,
    pub state: String,
    pub urgency: String,
}

/// DTO for progressing a rescue report. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRescueReport {
    pub urgency: Option<String>,
    pub status: Option<String>,
    pub assigned_shelter_id: Option<DbId>,
}
