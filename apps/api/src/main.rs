//! # FH Online API
//!
//! HTTP server for the FH Online storefront.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. tracing (RUST_LOG)                                                 │
//! │  2. ApiConfig from FH_* env vars                                       │
//! │  3. SQLite pool + migrations                                           │
//! │  4. SMS gateway (HTTP, or log-only when unconfigured)                  │
//! │  5. Onboarding worker task                                             │
//! │  6. axum::serve until Ctrl+C / SIGTERM                                 │
//! │  7. stop worker, close pool                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fh_api::jobs::OnboardingWorker;
use fh_api::sms::{HttpSmsGateway, LogSmsGateway};
use fh_api::{build_router, ApiConfig, AppState, SmsGateway};
use fh_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting FH Online API server...");

    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        db = %config.database_path,
        sms = ?config.sms,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    let sms: Arc<dyn SmsGateway> = if config.sms.is_configured() {
        Arc::new(HttpSmsGateway::new(&config.sms)?)
    } else {
        warn!("SMS gateway not configured, messages will only be logged");
        Arc::new(LogSmsGateway)
    };

    let addr = config.listen_addr();
    let poll_interval = config.job_poll_interval();
    let state = Arc::new(AppState::new(db.clone(), sms.clone(), config));

    let (worker, worker_handle) = OnboardingWorker::new(
        db.clone(),
        sms,
        poll_interval,
        state.jobs_notify.clone(),
    );
    let worker_task = tokio::spawn(worker.run());

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    worker_handle.shutdown().await;
    if let Err(e) = worker_task.await {
        warn!(error = %e, "Onboarding worker task ended abnormally");
    }
    db.close().await;

    info!("Server shutdown complete");
    Ok(())
}

/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fh_api=trace` - Trace the API crate only
/// - `fh` matches every target starting with it (`fh_api`, `fh_db`)
/// - Default: `info,fh=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fh=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
