//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level is applied
/// to this crate and to the HTTP trace layer.
pub fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("gateway_echo={default_level},tower_http={default_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
