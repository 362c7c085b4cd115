//! Admin-only handlers for the `/admin/users` resource.

use axum::extract::{Path, Query, State};
use axum::Json;

use pawhaven_core::error::CoreError;
use pawhaven_core::types::DbId;
use pawhaven_db::models::user::{UpdateUser, UserResponse};
use pawhaven_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{DataResponse, ListResponse, Pagination};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_auth): RequireAdmin,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ListResponse<UserResponse>>> {
    let (page, limit, offset) = params.clamped();

    let users = UserRepo::list(&state.pool, limit, offset).await?;
    let total = UserRepo::count(&state.pool).await?;

    let users = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(ListResponse::new(
        users,
        Pagination::new(total, page, limit),
    )))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_auth): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse::new(user.into())))
}

/// PUT /api/admin/users/{id}
///
/// Update profile fields, activate/deactivate, or verify an account.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    // Admins cannot deactivate themselves; someone has to hold the keys.
    if id == auth.user_id && input.is_active == Some(false) {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot deactivate your own account".into(),
        )));
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, admin_id = auth.user_id, "User updated by admin");
    Ok(Json(DataResponse::new(user.into())))
}
