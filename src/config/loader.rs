//! Configuration loading from disk and environment overrides.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationErrors};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply process-environment overrides on top of a loaded config.
///
/// Called once at startup; request handling never reads the
/// environment.
///
/// - `PORT` rewrites the port of the listener bind address.
/// - `AWS_EXECUTION_ROLE_ARN` seeds the identity execution-role ARN
///   when the config file left it unset.
pub fn apply_env_overrides(config: &mut ServiceConfig) {
    if let Ok(port) = std::env::var("PORT") {
        if let Ok(port) = port.parse::<u16>() {
            config.listener.bind_address = rewrite_port(&config.listener.bind_address, port);
        } else {
            tracing::warn!(port = %port, "Ignoring unparseable PORT override");
        }
    }

    if config.identity.execution_role_arn.is_none() {
        if let Ok(arn) = std::env::var("AWS_EXECUTION_ROLE_ARN") {
            if !arn.is_empty() {
                config.identity.execution_role_arn = Some(arn);
            }
        }
    }
}

/// Replace the port of a "host:port" bind address.
fn rewrite_port(bind_address: &str, port: u16) -> String {
    match bind_address.rsplit_once(':') {
        Some((host, _)) => format!("{host}:{port}"),
        None => format!("{bind_address}:{port}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_port_replaces_only_the_port() {
        assert_eq!(rewrite_port("0.0.0.0:8080", 3000), "0.0.0.0:3000");
        assert_eq!(rewrite_port("127.0.0.1:9000", 80), "127.0.0.1:80");
    }

    #[test]
    fn rewrite_port_appends_when_no_port_present() {
        assert_eq!(rewrite_port("localhost", 8080), "localhost:8080");
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
