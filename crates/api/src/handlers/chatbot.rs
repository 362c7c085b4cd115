//! Handler for the `/chatbot` proxy endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted message length in characters.
const MAX_MESSAGE_CHARS: usize = 2_000;

/// Request body for `POST /chatbot`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response payload: the upstream reply text.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// POST /api/chatbot
///
/// Forward one message to the configured chat-completion upstream and
/// return the reply. Fails with 500 when no upstream is configured.
pub async fn ask(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Json(input): Json<ChatRequest>,
) -> AppResult<Json<DataResponse<ChatReply>>> {
    let message = input.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".into()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::BadRequest(format!(
            "message exceeds the maximum length of {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let client = state
        .chatbot
        .as_ref()
        .ok_or_else(|| AppError::InternalError("Chatbot upstream is not configured".into()))?;

    let reply = client
        .ask(message)
        .await
        .map_err(|e| AppError::InternalError(format!("Chatbot upstream error: {e}")))?;

    Ok(Json(DataResponse::new(ChatReply { reply })))
}
