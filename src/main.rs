mod app_state;
mod config;
mod models;
mod routes;
mod services;
mod store;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use app_state::AppState;
use config::AppConfig;
use services::download::HttpDownloader;
use services::upload::{ImageUploader, ImgurClient, NoopUploader};
use store::MemoryStore;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing imgbatch server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    // Register application metrics
    metrics::describe_counter!("upload_jobs_total", "Total batch upload jobs submitted");
    metrics::describe_counter!(
        "upload_jobs_completed",
        "Total batch upload jobs that reached complete"
    );
    metrics::describe_counter!(
        "image_download_failures_total",
        "Individual image downloads that failed"
    );
    metrics::describe_histogram!(
        "job_processing_seconds",
        "Time from job start to terminal status"
    );

    // In-memory job store, injected into the orchestrator and routes
    let store = Arc::new(MemoryStore::new());

    // Initialize transports
    let downloader = HttpDownloader::new(Duration::from_secs(config.download_timeout_secs))
        .expect("Failed to initialize HTTP downloader");

    let uploader: Arc<dyn ImageUploader> = match config.imgur_client_id.clone() {
        Some(client_id) => {
            tracing::info!("Uploading to Imgur at {}", config.imgur_api_url);
            Arc::new(ImgurClient::new(config.imgur_api_url.clone(), client_id))
        }
        None => {
            tracing::info!("No IMGUR_CLIENT_ID configured, uploads are a no-op");
            Arc::new(NoopUploader)
        }
    };

    // Create shared application state
    let state = AppState::new(store, Arc::new(downloader), uploader);

    // Build API routes
    let app = routes::api_router(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1 MB limit

    tracing::info!("Starting imgbatch on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
