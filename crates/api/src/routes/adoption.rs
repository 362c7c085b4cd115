//! Route definitions for the `/adoption` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::adoption;
use crate::state::AppState;

/// Routes mounted at `/adoption`.
///
/// ```text
/// GET  /                 -> list (shelter-scoped / admin)
/// POST /                 -> submit (adopter)
/// GET  /my-applications  -> applicant's own applications
/// GET  /{id}             -> get (applicant/owner/admin)
/// PUT  /{id}             -> review (owner/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(adoption::list_applications).post(adoption::submit_application),
        )
        .route("/my-applications", get(adoption::my_applications))
        .route(
            "/{id}",
            get(adoption::get_application).put(adoption::review_application),
        )
}
