//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the minimum requirement. Resource-scoped checks (shelter owns
//! the pet, user owns the application) happen in the handlers via the
//! capability functions in `pawhaven_core`; these extractors only gate by
//! role.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pawhaven_core::error::CoreError;
use pawhaven_core::roles::{ROLE_ADMIN, ROLE_SHELTER, ROLE_USER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `shelter` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireShelter(pub AuthUser);

impl FromRequestParts<AppState> for RequireShelter {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_SHELTER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Shelter or Admin role required".into(),
            )));
        }
        Ok(RequireShelter(user))
    }
}

/// Requires the plain `user` role (adopters). Shelters and admins do not
/// submit adoption applications.
pub struct RequireAdopter(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdopter {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_USER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only adopter accounts may perform this action".into(),
            )));
        }
        Ok(RequireAdopter(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// handlers where the intent "this route requires authentication" should be
/// self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
