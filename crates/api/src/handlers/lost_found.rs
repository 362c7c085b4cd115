//! Handlers for the `/lost-found` resource.
//!
//! Reports are publicly browsable so the community can help reunite pets
//! with their owners. Filing, updating, and deleting require authentication;
//! only the reporter or an admin may modify a report.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use pawhaven_core::error::CoreError;
use pawhaven_core::pets::validate_species;
use pawhaven_core::roles::ROLE_ADMIN;
use pawhaven_core::types::{DbId, Timestamp};
use pawhaven_db::models::lost_found::{
    CreateLostFoundReport, LostFoundFilter, LostFoundReport, UpdateLostFoundReport,
};
use pawhaven_db::repositories::LostFoundRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::PageParams;
use crate::response::{DataResponse, ListResponse, Pagination};
use crate::state::AppState;

/// Accepted report types.
const VALID_REPORT_TYPES: &[&str] = &["lost", "found"];

/// Statuses a report moves through.
const VALID_STATUSES: &[&str] = &["open", "resolved"];

/// Request body for `POST /lost-found`.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
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

/// Query parameters for the report list endpoint.
#[derive(Debug, Deserialize)]
pub struct ReportListParams {
    pub report_type: Option<String>,
    pub species: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/lost-found
pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<ListResponse<LostFoundReport>>> {
    let filter = LostFoundFilter {
        report_type: params.report_type,
        species: params.species,
        status: params.status,
        city: params.city,
    };
    let (page, limit, offset) = PageParams {
        page: params.page,
        limit: params.limit,
    }
    .clamped();

    let reports = LostFoundRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = LostFoundRepo::count(&state.pool, &filter).await?;

    Ok(Json(ListResponse::new(
        reports,
        Pagination::new(total, page, limit),
    )))
}

/// GET /api/lost-found/{id}
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LostFoundReport>>> {
    let report = LostFoundRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LostFoundReport",
            id,
        }))?;
    Ok(Json(DataResponse::new(report)))
}

/// POST /api/lost-found
pub async fn create_report(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Json(input): Json<ReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LostFoundReport>>)> {
    if !VALID_REPORT_TYPES.contains(&input.report_type.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid report type '{}'. Must be one of: {}",
            input.report_type,
            VALID_REPORT_TYPES.join(", ")
        ))));
    }
    validate_species(&input.species)?;
    if input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "description must not be empty".into(),
        )));
    }

    let report = LostFoundRepo::create(
        &state.pool,
        &CreateLostFoundReport {
            reporter_id: auth.user_id,
            report_type: input.report_type,
            pet_name: input.pet_name,
            species: input.species,
            breed: input.breed,
            color: input.color,
            description: input.description,
            last_seen_city: input.last_seen_city,
            last_seen_state: input.last_seen_state,
            last_seen_at: input.last_seen_at,
            contact_phone: input.contact_phone,
        },
    )
    .await?;

    tracing::info!(report_id = report.id, report_type = %report.report_type,
        "Lost-and-found report filed");
    Ok((StatusCode::CREATED, Json(DataResponse::new(report))))
}

/// PUT /api/lost-found/{id}
pub async fn update_report(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLostFoundReport>,
) -> AppResult<Json<DataResponse<LostFoundReport>>> {
    let existing = find_owned_report(&state, id, &auth).await?;

    if let Some(status) = &input.status {
        if !VALID_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid status '{status}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))));
        }
    }

    let report = LostFoundRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LostFoundReport",
            id,
        }))?;
    Ok(Json(DataResponse::new(report)))
}

/// DELETE /api/lost-found/{id}
pub async fn delete_report(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_owned_report(&state, id, &auth).await?;

    LostFoundRepo::delete(&state.pool, existing.id).await?;

    // Cascade photo deletion; the row is already gone so failures only log.
    for photo in &existing.photos.0 {
        if let Err(e) = state.media.delete(&photo.public_id).await {
            tracing::warn!(report_id = id, public_id = %photo.public_id, error = %e,
                "Failed to delete report photo from storage");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a report and check the actor may modify it (reporter or admin).
async fn find_owned_report(
    state: &AppState,
    id: DbId,
    auth: &crate::middleware::auth::AuthUser,
) -> AppResult<LostFoundReport> {
    let report = LostFoundRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LostFoundReport",
            id,
        }))?;

    if report.reporter_id != auth.user_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may not modify this report".into(),
        )));
    }
    Ok(report)
}
