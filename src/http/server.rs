//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router feeding the dispatcher
//! - Wire up middleware (request ID, tracing, timeout, CORS)
//! - Bind the server to a listener with graceful shutdown
//! - Record per-request metrics

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::middleware::cors::cors_middleware;
use crate::http::request::RequestIdLayer;
use crate::observability::metrics;
use crate::routing::Dispatcher;

/// Request bodies beyond this size fail to buffer and are treated as
/// empty (and therefore malformed) by the dispatcher.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP server for the echo API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(config.identity.clone()));
        let state = AppState { dispatcher };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(api_handler))
            .route("/", any(api_handler))
            .with_state(state)
            .layer(axum::middleware::from_fn(cors_middleware))
            .layer(
                ServiceBuilder::new()
                    .layer(RequestIdLayer)
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Single handler behind the catch-all routes: buffer the body, hand
/// the request to the dispatcher, serialize the reply.
async fn api_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();
    let method = parts.method.clone();

    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(%error, path, "Failed to buffer request body");
            axum::body::Bytes::new()
        }
    };

    let reply = state
        .dispatcher
        .dispatch(&method, &path, &parts.headers, &body);
    let (status, payload) = reply.render();

    metrics::record_request(method.as_str(), &path, status.as_u16(), start);

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    )
        .into_response()
}
