use std::sync::Arc;

use anyhow::Context;
use archive_api::{
    build_router,
    config::{AppConfig, StorageBackend},
    database::connection::get_db_client,
    services::{ArchiveService, InMemoryArchiveService, MongoArchiveService},
    state::AppState,
};
use axum::Router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let archive_service = initialize_archive_service(&config).await?;
    let app = build_router(AppState::new(archive_service));

    start_server(app, &config).await
}

async fn initialize_archive_service(config: &AppConfig) -> anyhow::Result<Arc<dyn ArchiveService>> {
    match config.storage {
        StorageBackend::Mongo => {
            tracing::info!("🔧 Connecting to MongoDB...");
            let db = get_db_client(config)
                .await
                .context("Failed to connect to MongoDB")?;
            Ok(Arc::new(MongoArchiveService::new(db)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory archive store; data is lost on restart");
            Ok(Arc::new(InMemoryArchiveService::new()))
        }
    }
}

async fn start_server(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("🚀 Server starting on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
