//! Route definitions for the `/donations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::donations;
use crate::state::AppState;

/// Routes mounted at `/donations`.
///
/// ```text
/// GET  /      -> list (admin)
/// POST /      -> create (public, auth optional)
/// GET  /{id}  -> get (admin)
/// PUT  /{id}  -> settle (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(donations::list_donations).post(donations::create_donation),
        )
        .route(
            "/{id}",
            get(donations::get_donation).put(donations::set_donation_status),
        )
}
