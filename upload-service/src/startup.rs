use crate::config::UploadConfig;
use crate::handlers;
use crate::services::{LocalStorage, MetadataStore, Storage};
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: UploadConfig,
    pub storage: Arc<dyn Storage>,
    pub metadata: Arc<dyn MetadataStore>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/upload-document",
            // Uploads are written as received; no size cap.
            post(handlers::upload_document).layer(DefaultBodyLimit::disable()),
        )
        .route("/get-history", get(handlers::get_history))
        .route("/update-history", put(handlers::update_history))
        .route("/delete-history", delete(handlers::delete_history))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the service with files stored under `config.storage.upload_dir`.
    pub async fn build(
        config: UploadConfig,
        metadata: Arc<dyn MetadataStore>,
    ) -> Result<Self, AppError> {
        let local = LocalStorage::new(&config.storage.upload_dir)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to initialize local storage at {}: {:#}",
                    config.storage.upload_dir,
                    e
                );
                AppError::InternalError(e)
            })?;
        tracing::info!(upload_dir = %local.base_path().display(), "Local storage ready");
        let storage: Arc<dyn Storage> = Arc::new(local);

        let state = AppState {
            config,
            storage,
            metadata,
        };

        Self::from_state(state).await
    }

    /// Bind and wire a caller-assembled state.
    pub async fn from_state(state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, build_router(self.state)).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, build_router(self.state))
            .with_graceful_shutdown(signal)
            .await
    }
}
