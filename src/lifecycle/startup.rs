//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging, the tracer and metrics in dependency order
//! - Bind the listener and serve until shutdown
//! - Flush spans once the runtime has stopped
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The tracer provider lives outside the runtime; its exporter runs a
//!   blocking HTTP client on a dedicated worker thread

use std::path::Path;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, ServiceConfig};
use crate::http::HttpServer;
use crate::observability::tracing::{init_tracer, TelemetryError};
use crate::observability::{logging, metrics, RequestTracer};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tracing error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load configuration, initialize logging and run the service.
pub fn launch(config_path: Option<&Path>) -> Result<(), StartupError> {
    let config = load_config(config_path)?;
    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        log_level = %config.observability.log_level,
        collector = %config.tracing.collector_endpoint(),
        "inventory-service starting"
    );

    run(config)
}

/// Run the service with an already validated configuration.
pub fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let telemetry = init_tracer(&config.tracing)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(serve(config, telemetry.request_tracer()));
    drop(runtime);

    telemetry.shutdown();
    tracing::info!("Shutdown complete");
    result
}

async fn serve(config: ServiceConfig, tracer: RequestTracer) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        "MSA Inventory Service listening on port: {}",
        local_addr.port()
    );

    // Only an OS signal stops the process.
    let server = HttpServer::new(config, tracer);
    server.run(listener, std::future::pending()).await?;

    Ok(())
}
