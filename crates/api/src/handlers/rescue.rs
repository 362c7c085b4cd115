//! Handlers for the `/rescue` resource: reporting animals in distress and
//! the shelter-side triage workflow.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use pawhaven_core::error::CoreError;
use pawhaven_core::types::DbId;
use pawhaven_db::models::rescue::{CreateRescueReport, RescueReport, UpdateRescueReport};
use pawhaven_db::repositories::RescueRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireShelter};
use crate::query::PageParams;
use crate::response::{DataResponse, ListResponse, Pagination};
use crate::state::AppState;

const VALID_URGENCIES: &[&str] = &["low", "medium", "high"];

const VALID_STATUSES: &[&str] = &["reported", "in_progress", "rescued", "closed"];

/// Request body for `POST /rescue`.
#[derive(Debug, Deserialize)]
pub struct RescueRequest {
    pub animal_type: String,
    pub description: String,
    pub city: String,
    pub state: String,
    pub urgency: Option<String>,
}

/// POST /api/rescue
///
/// Report an animal in distress. Any authenticated user may file.
pub async fn create_report(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Json(input): Json<RescueRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RescueReport>>)> {
    if input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "description must not be empty".into(),
        )));
    }

    let urgency = input.urgency.unwrap_or_else(|| "medium".to_string());
    validate_urgency(&urgency)?;

    let report = RescueRepo::create(
        &state.pool,
        &CreateRescueReport {
            reporter_id: auth.user_id,
            animal_type: input.animal_type,
            description: input.description,
            city: input.city,
            state: input.state,
            urgency,
        },
    )
    .await?;

    tracing::info!(report_id = report.id, urgency = %report.urgency,
        "Rescue report filed");
    Ok((StatusCode::CREATED, Json(DataResponse::new(report))))
}

/// GET /api/rescue
///
/// List rescue reports, most urgent first. Shelter and admin only.
pub async fn list_reports(
    State(state): State<AppState>,
    RequireShelter(_auth): RequireShelter,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ListResponse<RescueReport>>> {
    let (page, limit, offset) = params.clamped();

    let reports = RescueRepo::list(&state.pool, limit, offset).await?;
    let total = RescueRepo::count(&state.pool).await?;

    Ok(Json(ListResponse::new(
        reports,
        Pagination::new(total, page, limit),
    )))
}

/// GET /api/rescue/{id}
pub async fn get_report(
    State(state): State<AppState>,
    RequireShelter(_auth): RequireShelter,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RescueReport>>> {
    let report = RescueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RescueReport",
            id,
        }))?;
    Ok(Json(DataResponse::new(report)))
}

/// PUT /api/rescue/{id}
///
/// Progress a report: adjust urgency, move it through the triage statuses,
/// or assign it to a shelter.
pub async fn update_report(
    State(state): State<AppState>,
    RequireShelter(_auth): RequireShelter,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRescueReport>,
) -> AppResult<Json<DataResponse<RescueReport>>> {
    if let Some(urgency) = &input.urgency {
        validate_urgency(urgency)?;
    }
    if let Some(status) = &input.status {
        if !VALID_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid status '{status}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))));
        }
    }

    let report = RescueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RescueReport",
            id,
        }))?;
    Ok(Json(DataResponse::new(report)))
}

fn validate_urgency(urgency: &str) -> Result<(), CoreError> {
    if VALID_URGENCIES.contains(&urgency) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid urgency '{urgency}'. Must be one of: {}",
            VALID_URGENCIES.join(", ")
        )))
    }
}
