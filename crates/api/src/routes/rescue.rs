//! Route definitions for the `/rescue` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::rescue;
use crate::state::AppState;

/// Routes mounted at `/rescue`.
///
/// ```text
/// GET  /      -> list (shelter/admin)
/// POST /      -> file (auth)
/// GET  /{id}  -> get (shelter/admin)
/// PUT  /{id}  -> progress (shelter/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rescue::list_reports).post(rescue::create_report))
        .route(
            "/{id}",
            get(rescue::get_report).put(rescue::update_report),
        )
}
