pub mod error;
pub mod handlers;
pub mod models;
pub mod render;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::document::PageRasterizer;
use crate::ocr::TextRecognizer;
use crate::utils::config::AppConfig;

/// Shared request state: the injected collaborators plus storage settings.
///
/// The recognition engine is constructed once at startup and shared across
/// requests; tests substitute fakes through the same handles.
#[derive(Clone)]
pub struct AppState {
    pub recognizer: Arc<dyn TextRecognizer>,
    pub rasterizer: Arc<dyn PageRasterizer>,
    pub storage_dir: PathBuf,
    pub max_file_size: u64,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        recognizer: Arc<dyn TextRecognizer>,
        rasterizer: Arc<dyn PageRasterizer>,
    ) -> Self {
        Self {
            recognizer,
            rasterizer,
            storage_dir: PathBuf::from(config.storage_directory.as_ref()),
            max_file_size: config.max_file_size,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    // Body limit tracks the configured upload ceiling, with headroom for
    // multipart framing.
    let body_limit = state.max_file_size as usize + 64 * 1024;

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(
            "/ocr",
            post(handlers::recognize_upload).fallback(handlers::method_advisory),
        )
        .route("/download/{filename}", get(handlers::download))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting server on {}", addr);

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("OCR endpoint: http://{}/ocr", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
