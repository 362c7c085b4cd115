//! Route definitions for the `/pets` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::pets;
use crate::state::AppState;

/// Routes mounted at `/pets`.
///
/// ```text
/// GET    /                          -> list (public)
/// POST   /                          -> create (shelter/admin)
/// GET    /{id}                      -> get (public)
/// PUT    /{id}                      -> update (owner/admin)
/// DELETE /{id}                      -> delete (owner/admin)
/// POST   /{id}/photos               -> upload photos (multipart)
/// DELETE /{id}/photos/{*public_id}  -> delete one photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pets::list_pets).post(pets::create_pet))
        .route(
            "/{id}",
            get(pets::get_pet)
                .put(pets::update_pet)
                .delete(pets::delete_pet),
        )
        .route("/{id}/photos", post(pets::upload_photos))
        // Storage ids contain slashes, so capture the rest of the path.
        .route("/{id}/photos/{*public_id}", delete(pets::delete_photo))
}
