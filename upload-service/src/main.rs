use service_core::observability::init_tracing;
use std::sync::Arc;
use tokio::signal;
use upload_service::config::UploadConfig;
use upload_service::services::{init_metrics, NoopMetadataStore};
use upload_service::startup::Application;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
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

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let config = UploadConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "upload-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    );

    tracing::info!(
        upload_dir = %config.storage.upload_dir,
        port = config.common.port,
        "Starting upload-service"
    );

    let app = Application::build(config, Arc::new(NoopMetadataStore))
        .await
        .map_err(|e| std::io::Error::other(format!("Startup error: {}", e)))?;

    app.run_with_shutdown(shutdown_signal()).await
}
