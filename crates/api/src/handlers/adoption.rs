//! Handlers for the `/adoption` resource: submitting applications and the
//! shelter-side review workflow.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use pawhaven_core::adoption::{can_manage_application, can_view_application, ReviewDecision};
use pawhaven_core::error::CoreError;
use pawhaven_core::roles::ROLE_SHELTER;
use pawhaven_core::types::DbId;
use pawhaven_db::models::adoption::{
    AdoptionApplication, ApplicationDetail, ApplicationDetails, ApplicationFilter,
};
use pawhaven_db::repositories::AdoptionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdopter, RequireAuth, RequireShelter};
use crate::query::PageParams;
use crate::response::{DataResponse, ListResponse, Pagination};
use crate::state::AppState;

/// Request body for `POST /adoption`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
    /// Target pet id.
    pub pet: DbId,
    pub application_details: ApplicationDetails,
}

/// Request body for `PUT /adoption/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewApplicationRequest {
    pub status: ReviewDecision,
    pub review_notes: Option<String>,
}

/// Query parameters for the application list endpoint.
#[derive(Debug, Deserialize)]
pub struct ApplicationListParams {
    pub status: Option<pawhaven_core::adoption::ApplicationStatus>,
    pub pet: Option<DbId>,
    pub user: Option<DbId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/adoption
///
/// List applications with optional filters. Shelter accounts only see
/// applications targeting their own pets; admins see everything.
pub async fn list_applications(
    State(state): State<AppState>,
    RequireShelter(auth): RequireShelter,
    Query(params): Query<ApplicationListParams>,
) -> AppResult<Json<ListResponse<ApplicationDetail>>> {
    let filter = ApplicationFilter {
        status: params.status,
        pet: params.pet,
        user: params.user,
    };
    let (page, limit, offset) = PageParams {
        page: params.page,
        limit: params.limit,
    }
    .clamped();

    let shelter_scope = (auth.role == ROLE_SHELTER).then_some(auth.user_id);

    let applications =
        AdoptionRepo::list(&state.pool, &filter, shelter_scope, limit, offset).await?;
    let total = AdoptionRepo::count(&state.pool, &filter, shelter_scope).await?;

    Ok(Json(ListResponse::new(
        applications,
        Pagination::new(total, page, limit),
    )))
}

/// GET /api/adoption/my-applications
///
/// List every application the authenticated user has submitted.
pub async fn my_applications(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<ApplicationDetail>>>> {
    let applications = AdoptionRepo::list_for_applicant(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse::new(applications)))
}

/// GET /api/adoption/{id}
///
/// Fetch one application. Visible to the applicant, the shelter owning the
/// targeted pet, and admins.
pub async fn get_application(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ApplicationDetail>>> {
    let application = AdoptionRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdoptionApplication",
            id,
        }))?;

    if !can_view_application(
        auth.user_id,
        &auth.role,
        application.applicant_id,
        application.pet_shelter_id,
    ) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may not view this application".into(),
        )));
    }

    Ok(Json(DataResponse::new(application)))
}

/// POST /api/adoption
///
/// Submit a new adoption application. Adopter accounts only; the whole
/// command (availability guard, duplicate guard, insert, pet transition)
/// runs in one transaction.
pub async fn submit_application(
    State(state): State<AppState>,
    RequireAdopter(auth): RequireAdopter,
    Json(input): Json<SubmitApplicationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AdoptionApplication>>)> {
    let application =
        AdoptionRepo::submit(&state.pool, input.pet, auth.user_id, &input.application_details)
            .await?;

    tracing::info!(
        application_id = application.id,
        pet_id = input.pet,
        applicant_id = auth.user_id,
        "Adoption application submitted"
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(application))))
}

/// PUT /api/adoption/{id}
///
/// Approve or reject an application. Only the shelter owning the targeted
/// pet (or an admin) may review. Approval atomically rejects every other
/// pending application for the pet and marks it adopted.
pub async fn review_application(
    State(state): State<AppState>,
    RequireShelter(auth): RequireShelter,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewApplicationRequest>,
) -> AppResult<Json<DataResponse<AdoptionApplication>>> {
    let detail = AdoptionRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdoptionApplication",
            id,
        }))?;

    if !can_manage_application(auth.user_id, &auth.role, detail.pet_shelter_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may not review applications for this pet".into(),
        )));
    }

    let application = AdoptionRepo::review(
        &state.pool,
        id,
        auth.user_id,
        input.status,
        input.review_notes.as_deref(),
    )
    .await?;

    tracing::info!(
        application_id = id,
        reviewer_id = auth.user_id,
        decision = ?input.status,
        "Adoption application reviewed"
    );
    Ok(Json(DataResponse::new(application)))
}
