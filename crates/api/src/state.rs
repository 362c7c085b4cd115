use std::sync::Arc;

use crate::chatbot::ChatbotClient;
use crate::config::ServerConfig;
use crate::media::MediaStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pawhaven_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Media storage backend (S3 in production).
    pub media: Arc<dyn MediaStore>,
    /// Chatbot upstream client; `None` when not configured.
    pub chatbot: Option<Arc<ChatbotClient>>,
}
