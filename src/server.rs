//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, worker spawning, and the Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::{Config, StorageBackend};
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{InMemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::{AppState, DynLinkService};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link storage (PostgreSQL pool + migrations, or in-memory)
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
///
/// After the server stops accepting requests, the click queue is closed and
/// the worker is awaited so already-queued clicks are still recorded.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_repository = build_repository(&config).await?;

    let link_service: Arc<DynLinkService> = Arc::new(
        LinkService::new(link_repository)
            .with_code_settings(config.code_length, config.code_max_attempts),
    );

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let worker = tokio::spawn(run_click_worker(
        click_rx,
        link_service.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!(
        concurrency = config.click_worker_concurrency,
        "Click worker started"
    );

    let state = AppState::new(link_service, click_tx, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, draining click queue");
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Click worker terminated abnormally");
    }

    Ok(())
}

/// Creates the configured storage backend.
async fn build_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, links will be lost on restart");
            Ok(Arc::new(InMemoryLinkRepository::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres storage backend")?;

            let pool = connect_pool(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
        }
    }
}

/// Opens a PostgreSQL pool using the configured pool settings.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
