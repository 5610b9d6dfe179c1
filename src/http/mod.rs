//! HTTP server.
//!
//! Routes:
//!
//! | Method | Path            | Handler                        |
//! |--------|-----------------|--------------------------------|
//! | GET    | `/api/images`   | [`handlers::images`]           |
//! | POST   | `/api/register` | [`handlers::auth`]             |
//! | POST   | `/api/login`    | [`handlers::auth`]             |
//! | POST   | `/api/analyze`  | [`handlers::analyze`]          |
//! | GET    | `/health`       | [`handlers::health`]           |
//!
//! Anything else is served from the public directory. Every request is
//! logged with its method and path before routing.

mod error;
mod extract;
pub mod handlers;
mod metrics;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

pub use error::AppError;

use crate::config::Config;
use crate::random::{RandomSource, ThreadRandom};
use crate::store::RecordStore;
use crate::uploads::UploadStorage;

/// Dependencies injected into every handler.
///
/// Cheap to clone; nothing in it is mutated after construction.
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub rng: Arc<dyn RandomSource>,
    pub uploads: UploadStorage,
}

impl AppState {
    /// State with the production random source and in-memory uploads.
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            rng: Arc::new(ThreadRandom),
            uploads: UploadStorage::Memory,
        }
    }

    /// Replaces the random source.
    #[must_use]
    pub fn with_rng<R: RandomSource>(mut self, rng: R) -> Self {
        self.rng = Arc::new(rng);
        self
    }

    /// Replaces the upload storage strategy.
    #[must_use]
    pub fn with_uploads(mut self, uploads: UploadStorage) -> Self {
        self.uploads = uploads;
        self
    }
}

/// Builds the application router.
pub fn router(state: AppState, public_dir: &Path, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/images", get(handlers::list_images))
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route(
            "/api/analyze",
            post(handlers::analyze).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/health", get(handlers::health))
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local_addr = listener.local_addr().context("Failed to read bound address")?;

    let app = router(state, &config.public_dir, config.max_upload_bytes);

    info!(
        addr = %local_addr,
        public_dir = %config.public_dir.display(),
        "Server running at http://localhost:{}",
        local_addr.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn log_request(req: Request, next: Next) -> Response {
    info!(method = %req.method(), path = %req.uri(), "Incoming request");
    next.run(req).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        },
    }
}
