use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// S3 bucket for pet/report photos. When unset, an in-memory media
    /// store is used (local development only).
    pub media_bucket: Option<String>,
    /// Public base URL photos are served from (e.g. a CDN distribution).
    pub media_public_base_url: String,
    /// Upstream chat-completion endpoint. When unset, the chatbot route
    /// reports itself unconfigured.
    pub chatbot_api_url: Option<String>,
    /// Bearer token for the chatbot upstream.
    pub chatbot_api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `MEDIA_BUCKET`          | unset                      |
    /// | `MEDIA_PUBLIC_BASE_URL` | `http://localhost:3000/media` |
    /// | `CHATBOT_API_URL`       | unset                      |
    /// | `CHATBOT_API_KEY`       | unset                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let media_bucket = std::env::var("MEDIA_BUCKET").ok();
        let media_public_base_url = std::env::var("MEDIA_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/media".into());

        let chatbot_api_url = std::env::var("CHATBOT_API_URL").ok();
        let chatbot_api_key = std::env::var("CHATBOT_API_KEY").ok();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            media_bucket,
            media_public_base_url,
            chatbot_api_url,
            chatbot_api_key,
        }
    }
}
