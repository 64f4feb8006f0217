use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use crate::scorer::SentimentScorer;
use crate::service::AnalysisService;
use crate::storage::SqliteStore;

pub mod error;
pub mod routes;

/// Server state
pub struct AppState {
    pub service: AnalysisService,
}

/// Everything `start_server` needs, resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct ServeSettings {
    pub database: PathBuf,
    pub bind: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

/// CORS for an explicit origin allow-list, with credentials.
///
/// Methods and headers mirror the preflight request, since wildcards are not
/// permitted alongside credentials.
pub fn cors_layer(origins: &[String]) -> crate::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| crate::Error::Config(format!("invalid origin '{}': {}", o, e)))
        })
        .collect::<crate::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn create_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/analyze", post(routes::analyze))
        .route("/history", get(routes::history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(settings: ServeSettings, scorer: Arc<dyn SentimentScorer>) -> anyhow::Result<()> {
    let store = SqliteStore::open(&settings.database)?;
    let state = Arc::new(AppState {
        service: AnalysisService::new(store, scorer),
    });
    let cors = cors_layer(&settings.allowed_origins)?;
    let app = create_router(state, cors);

    let addr: SocketAddr = format!("{}:{}", settings.bind, settings.port).parse()?;
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Database: {}", settings.database.display());
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::warn!("Received SIGTERM, shutting down"),
    }
}
