//! # classroomd: classroom monitor daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the shared classroom state and application services
//! - Start the monitor loop on top of the sensor simulator
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use classroom_adapter_http_axum::state::AppState;
use classroom_adapter_storage_sqlite_sqlx::{SqliteControlLog, SqliteSensorLog};
use classroom_adapter_virtual::SimulatedClassroom;
use classroom_app::monitor::Monitor;
use classroom_app::services::control_service::ControlService;
use classroom_app::services::history_service::HistoryService;
use classroom_app::state::ClassroomState;
use classroom_domain::device::Registry;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Database
    if let Some(dir) = config.database_dir() {
        std::fs::create_dir_all(&dir)?;
    }
    let db = classroom_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    let sensor_log = Arc::new(SqliteSensorLog::new(pool.clone()));
    let control_log = Arc::new(SqliteControlLog::new(pool));

    // Services
    let classroom = Arc::new(ClassroomState::new(
        Registry::classroom(),
        config.monitor.initial_mode,
    ));
    let control_service = Arc::new(ControlService::new(classroom, Arc::clone(&control_log)));
    let history_service = Arc::new(HistoryService::new(Arc::clone(&sensor_log), control_log));

    // Monitor
    let source = SimulatedClassroom::new(config.simulator_config())?;
    let monitor = Monitor::new(
        source,
        sensor_log,
        Arc::clone(&control_service),
        config.monitor_config(),
    )
    .start();

    // HTTP
    let state = AppState::from_arcs(control_service, history_service);
    let app = classroom_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        %bind_addr,
        mode = %config.monitor.initial_mode,
        database = config.database_url(),
        "classroomd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    monitor.abort();
    tracing::info!("classroomd stopped");

    Ok(())
}

/// Resolve once SIGINT (Ctrl+C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
