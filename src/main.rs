//! wallet_ledger - Wallet Balance Backend API
//!
//! Reads wallet balances and applies deposits/withdrawals under a
//! non-negative balance constraint enforced by PostgreSQL.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallet_ledger::store::{LedgerStore, PgLedgerStore};
use wallet_ledger::{api, db, BalanceService, Config, LogFormat};

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wallet_ledger=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::from_filename("config.env").ok();
    dotenvy::dotenv().ok();

    // Load configuration; any missing key is fatal
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!("Starting wallet_ledger server");
    tracing::info!("Connecting to database...");

    let pool = db::create_pool(&config).await?;

    let store = PgLedgerStore::new(pool.clone(), config.db_endpoint());
    store.initialize_schema().await?;

    let service = BalanceService::new(Arc::new(store)).with_timeout(config.operation_timeout);

    let app = api::build_app(service);

    // Hostnames such as `localhost` or a container service name are resolved here
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Cleanup
    tracing::info!("Server shutting down...");
    pool.close().await;
    tracing::info!("Database connections closed. Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
