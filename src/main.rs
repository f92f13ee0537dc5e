//! IAM Gateway Identity Echo Service
//!
//! A demonstration REST API built with Tokio and Axum. It sits behind
//! several managed API-gateway fronts and echoes back a best-effort
//! reconstruction of the caller's gateway and IAM identity, inferred
//! from the proxy headers that reach the process.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────────┐
//!                          │                 GATEWAY-ECHO                      │
//!                          │                                                   │
//!     Gateway Request      │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!     ─────────────────────┼─▶│  http   │───▶│ routing  │───▶│  identity   │  │
//!                          │  │ adapter │    │dispatcher│    │ inferencer  │  │
//!                          │  └─────────┘    └────┬─────┘    └──────┬──────┘  │
//!                          │                      │                 │         │
//!                          │                      ▼                 │         │
//!     JSON Response        │  ┌─────────┐    ┌──────────┐          │         │
//!     ◀────────────────────┼──│  CORS   │◀───│ envelope │◀─────────┘         │
//!                          │  │ headers │    │ renderer │                     │
//!                          │  └─────────┘    └──────────┘                     │
//!                          │                                                   │
//!                          │  ┌─────────────────────────────────────────────┐ │
//!                          │  │          Cross-Cutting Concerns              │ │
//!                          │  │  ┌─────────┐ ┌────────────┐ ┌────────────┐  │ │
//!                          │  │  │ config  │ │observability│ │ lifecycle  │  │ │
//!                          │  │  └─────────┘ └────────────┘ └────────────┘  │ │
//!                          │  └─────────────────────────────────────────────┘ │
//!                          └──────────────────────────────────────────────────┘
//! ```
//!
//! The inferred identity is advisory only. Authentication and
//! authorization are enforced by the gateway fronts before a request
//! ever reaches this process.

use std::path::Path;

use tokio::net::TcpListener;

use gateway_echo::config::loader::{apply_env_overrides, load_config};
use gateway_echo::config::ServiceConfig;
use gateway_echo::http::HttpServer;
use gateway_echo::lifecycle::Shutdown;
use gateway_echo::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file as the first argument; defaults otherwise.
    let mut config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => ServiceConfig::default(),
    };
    apply_env_overrides(&mut config);

    logging::init_logging(&config.observability.log_level);

    tracing::info!("gateway-echo v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        gateways = config.identity.gateways.len(),
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
