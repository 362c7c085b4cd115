//! Route definitions for the `/lost-found` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::lost_found;
use crate::state::AppState;

/// Routes mounted at `/lost-found`.
///
/// ```text
/// GET    /      -> list (public)
/// POST   /      -> file (auth)
/// GET    /{id}  -> get (public)
/// PUT    /{id}  -> update (reporter/admin)
/// DELETE /{id}  -> delete (reporter/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(lost_found::list_reports).post(lost_found::create_report),
        )
        .route(
            "/{id}",
            get(lost_found::get_report)
                .put(lost_found::update_report)
                .delete(lost_found::delete_report),
        )
}
