//! Route definition for the `/chatbot` proxy endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::chatbot;
use crate::state::AppState;

/// Routes mounted at `/chatbot`.
///
/// ```text
/// POST / -> one-shot chat proxy (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chatbot::ask))
}
