//! Route definitions for the `/admin` resource (user management).

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET /users       -> list (admin)
/// GET /users/{id}  -> get (admin)
/// PUT /users/{id}  -> update (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user).put(users::update_user))
}
