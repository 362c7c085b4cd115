pub mod admin;
pub mod adoption;
pub mod auth;
pub mod chatbot;
pub mod donations;
pub mod health;
pub mod lost_found;
pub mod pets;
pub mod rescue;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             profile (requires auth)
///
/// /pets                                list (public), create (shelter/admin)
/// /pets/{id}                           get (public), update, delete (owner/admin)
/// /pets/{id}/photos                    upload (multipart, owner/admin)
/// /pets/{id}/photos/{public_id}        delete one photo (owner/admin)
///
/// /adoption                            list (shelter-scoped), submit (adopter)
/// /adoption/my-applications            applicant's own applications
/// /adoption/{id}                       get (applicant/owner/admin), review (PUT)
///
/// /donations                           create (public), list (admin)
/// /donations/{id}                      get, settle (admin)
///
/// /lost-found                          list, get (public); file, update, delete (auth)
///
/// /rescue                              file (auth); list, get, progress (shelter/admin)
///
/// /chatbot                             one-shot chat proxy (auth)
///
/// /admin/users                         list (admin)
/// /admin/users/{id}                    get, update (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication: register, login, refresh, logout, profile.
        .nest("/auth", auth::router())
        // Pet listings and photo management.
        .nest("/pets", pets::router())
        // Adoption application lifecycle.
        .nest("/adoption", adoption::router())
        // Donations.
        .nest("/donations", donations::router())
        // Lost-and-found reports.
        .nest("/lost-found", lost_found::router())
        // Rescue reports.
        .nest("/rescue", rescue::router())
        // Chatbot proxy.
        .nest("/chatbot", chatbot::router())
        // Admin user management.
        .nest("/admin", admin::router())
}
