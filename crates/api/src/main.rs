use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pawhaven_api::chatbot::ChatbotClient;
use pawhaven_api::config::ServerConfig;
use pawhaven_api::media::{InMemoryMediaStore, MediaStore, S3MediaStore};
use pawhaven_api::router::build_app_router;
use pawhaven_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pawhaven_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = pawhaven_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    pawhaven_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    pawhaven_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Media store ---
    let media: Arc<dyn MediaStore> = match &config.media_bucket {
        Some(bucket) => {
            tracing::info!(bucket = %bucket, "Using S3 media store");
            Arc::new(S3MediaStore::from_env(bucket.clone(), config.media_public_base_url.clone()).await)
        }
        None => {
            tracing::warn!("MEDIA_BUCKET not set; using in-memory media store (dev only)");
            Arc::new(InMemoryMediaStore::new(config.media_public_base_url.clone()))
        }
    };

    // --- Chatbot client ---
    let chatbot = config.chatbot_api_url.as_ref().map(|url| {
        tracing::info!(url = %url, "Chatbot upstream configured");
        Arc::new(ChatbotClient::new(url.clone(), config.chatbot_api_key.clone()))
    });
    if chatbot.is_none() {
        tracing::warn!("CHATBOT_API_URL not set; chatbot endpoint will report errors");
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
        chatbot,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
