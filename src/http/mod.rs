//! HTTP boundary adapter subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all routes)
//!     → request.rs (add request ID)
//!     → middleware/cors.rs (OPTIONS short-circuit, CORS headers)
//!     → [routing dispatcher decides status + envelope]
//!     → Send to client
//! ```
//!
//! An equivalent adapter for a managed proxy-event runtime would map
//! its event format onto the same dispatcher seam; only this direct
//! HTTP listener ships here.

pub mod middleware;
pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
