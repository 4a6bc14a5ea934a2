//! # devicehubd — devicehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize `tracing` from the configured filter
//! - Pick the repository backend: `SQLite` (pool + migrations) or in-memory
//! - Construct the device service, injecting the repository via its port trait
//! - Build the axum router, injecting the service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use tracing_subscriber::EnvFilter;

use devicehub_adapter_http_axum::router;
use devicehub_adapter_http_axum::state::AppState;
use devicehub_adapter_storage_memory::InMemoryDeviceRepository;
use devicehub_adapter_storage_sqlite_sqlx::SqliteDeviceRepository;
use devicehub_app::ports::DeviceRepository;
use devicehub_app::services::device_service::DeviceService;

use crate::config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let db = devicehub_adapter_storage_sqlite_sqlx::Config {
                database_url: config.database_url().to_string(),
            }
            .build()
            .await?;
            serve(&config, SqliteDeviceRepository::new(db.pool().clone())).await
        }
        StorageBackend::Memory => serve(&config, InMemoryDeviceRepository::new()).await,
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?}: {err}, falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve<DR>(config: &Config, repo: DR) -> Result<(), Box<dyn std::error::Error>>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let state = AppState::new(DeviceService::new(repo));
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        address = %bind_addr,
        backend = %config.storage.backend,
        "devicehubd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("devicehubd stopped");
    Ok(())
}

/// Resolve once Ctrl-C or, on unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
