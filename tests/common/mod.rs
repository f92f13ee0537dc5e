//! Shared utilities for integration testing.

use std::net::SocketAddr;

use gateway_echo::config::ServiceConfig;
use gateway_echo::http::HttpServer;
use gateway_echo::lifecycle::Shutdown;

/// Start the service on an ephemeral port. Returns its address and the
/// shutdown handle that stops it.
pub async fn start_service(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
