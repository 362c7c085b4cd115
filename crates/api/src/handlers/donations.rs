//! Handlers for the `/donations` resource.
//!
//! Donations may be made anonymously (no auth) or while logged in, in which
//! case the donor account is linked. Listing and settlement are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use pawhaven_core::error::CoreError;
use pawhaven_core::types::DbId;
use pawhaven_db::models::donation::{CreateDonation, Donation};
use pawhaven_db::repositories::DonationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{DataResponse, ListResponse, Pagination};
use crate::state::AppState;

/// Accepted donation purposes.
const VALID_PURPOSES: &[&str] = &["general", "medical", "food", "shelter_support"];

/// Settlement statuses an admin may set.
const VALID_STATUSES: &[&str] = &["pending", "completed", "failed"];

/// Request body for `POST /donations`.
#[derive(Debug, Deserialize, Validate)]
pub struct DonationRequest {
    #[validate(length(min = 1, message = "donor name must not be empty"))]
    pub donor_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub donor_email: String,
    #[validate(range(min = 100, message = "minimum donation is 100 cents"))]
    pub amount_cents: i64,
    /// ISO 4217 code, defaults to USD.
    pub currency: Option<String>,
    pub message: Option<String>,
    pub purpose: Option<String>,
}

/// Request body for `PUT /donations/{id}`.
#[derive(Debug, Deserialize)]
pub struct DonationStatusRequest {
    pub status: String,
}

/// POST /api/donations
///
/// Record a donation. Auth is optional; when present, the donation is
/// linked to the donor's account.
pub async fn create_donation(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Json(input): Json<DonationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Donation>>)> {
    input.validate()?;

    let purpose = input.purpose.unwrap_or_else(|| "general".to_string());
    if !VALID_PURPOSES.contains(&purpose.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid purpose '{purpose}'. Must be one of: {}",
            VALID_PURPOSES.join(", ")
        ))));
    }

    let donation = DonationRepo::create(
        &state.pool,
        &CreateDonation {
            donor_id: auth.map(|a| a.user_id),
            donor_name: input.donor_name,
            donor_email: input.donor_email,
            amount_cents: input.amount_cents,
            currency: input.currency.unwrap_or_else(|| "USD".to_string()),
            message: input.message,
            purpose,
        },
    )
    .await?;

    tracing::info!(donation_id = donation.id, amount_cents = donation.amount_cents,
        "Donation recorded");
    Ok((StatusCode::CREATED, Json(DataResponse::new(donation))))
}

/// GET /api/donations
pub async fn list_donations(
    State(state): State<AppState>,
    RequireAdmin(_auth): RequireAdmin,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ListResponse<Donation>>> {
    let (page, limit, offset) = params.clamped();

    let donations = DonationRepo::list(&state.pool, limit, offset).await?;
    let total = DonationRepo::count(&state.pool).await?;

    Ok(Json(ListResponse::new(
        donations,
        Pagination::new(total, page, limit),
    )))
}

/// GET /api/donations/{id}
pub async fn get_donation(
    State(state): State<AppState>,
    RequireAdmin(_auth): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Donation>>> {
    let donation = DonationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id,
        }))?;
    Ok(Json(DataResponse::new(donation)))
}

/// PUT /api/donations/{id}
///
/// Progress a donation's settlement status.
pub async fn set_donation_status(
    State(state): State<AppState>,
    RequireAdmin(_auth): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<DonationStatusRequest>,
) -> AppResult<Json<DataResponse<Donation>>> {
    if !VALID_STATUSES.contains(&input.status.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid status '{}'. Must be one of: {}",
            input.status,
            VALID_STATUSES.join(", ")
        ))));
    }

    let donation = DonationRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id,
        }))?;
    Ok(Json(DataResponse::new(donation)))
}
