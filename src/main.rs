//! Gold Guard server bootstrap

use anyhow::Context;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use goldguard::config::Config;
use goldguard::ledger::{AnyStore, Ledger, RemoteStore, StorageBackend};
use goldguard::scoring::Scanner;
use goldguard::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "goldguard=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Gold Guard server starting ({})...", config.environment);
    tracing::info!("Scan mode: {}", config.scan_mode);

    let scanner = Scanner::from_config(&config)
        .context("Failed to build signal source client")?;
    tracing::info!("Denylist: {} entries", scanner.denylist().len());

    let store = open_store(&config)?;
    let ledger = Ledger::new(store);
    tracing::info!("Report ledger ready with {} reports", ledger.count().await);

    let state = AppState::new(scanner, ledger, config.clone());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await
        .context("Server error")?;

    Ok(())
}

fn open_store(config: &Config) -> anyhow::Result<AnyStore> {
    tracing::info!("Storage backend: {}", config.storage_backend.as_str());

    let store = match config.storage_backend {
        StorageBackend::Memory => {
            if config.is_production() {
                tracing::error!("In-memory report store in production: reports are lost on restart");
            } else {
                tracing::warn!("Using in-memory report store, reports are lost on restart");
            }
            AnyStore::memory()
        }
        StorageBackend::File => AnyStore::file(&config.reports_file),
        StorageBackend::Remote => {
            let url = config.remote_store_url.as_deref()
                .context("STORAGE_BACKEND=remote requires REMOTE_STORE_URL")?;
            let timeout = Duration::from_secs(config.signal_timeout_secs);
            AnyStore::Remote(RemoteStore::new(url, config.remote_store_key.clone(), timeout)?)
        }
    };

    tracing::info!("Report store: {}", goldguard::ledger::ReportStore::describe(&store));
    Ok(store)
}
