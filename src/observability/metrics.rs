//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, path, status
//! - `api_request_duration_seconds` (histogram): latency distribution
//!
//! Recording is a no-op until an exporter is installed, so the request
//! path never depends on metrics being enabled.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "api_requests_total",
                "Total requests by method, path and status"
            );
            describe_histogram!(
                "api_request_duration_seconds",
                "Request latency in seconds"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(error) => {
            tracing::error!(%error, "Failed to install metrics exporter");
        }
    }
}

/// Record one completed request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("api_requests_total", &labels).increment(1);
    histogram!("api_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}
