//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request counters, latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Header values are only ever logged as bounded previews
//! - The request ID flows through all log lines via the trace layer
//! - Metrics are cheap (atomic increments) and optional

pub mod logging;
pub mod metrics;
