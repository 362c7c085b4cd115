//! Donation model and DTOs.

use pawhaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `donations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub donor_id: Option<DbId>,
    pub donor_name: String,
    pub donor_email: String,
    pub amount_cents: i64,
    pub currency: String,
    pub message: Option<String>,
    pub purpose: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a new donation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDonation {
    pub donor_id: Option<DbId>,
    pub donor_name: String,
    pub donor_email: String,
    pub amount_cents: i64,
    pub currency: String,
    pub message: Option<String>,
    pub purpose: String,
}
