//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees
//! syntactically. Returns all validation errors, not just the first,
//! so a broken config file can be fixed in one pass.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyBindAddress,
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    ZeroPreviewLen,
    EmptyGatewayFragment(usize),
    EmptyGatewayLabel(usize),
    MultipleApiKeyFallbacks,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyBindAddress => write!(f, "listener.bind_address is empty"),
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address '{addr}' is not a socket address")
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(
                    f,
                    "observability.metrics_address '{addr}' is not a socket address"
                )
            }
            ValidationError::ZeroPreviewLen => write!(f, "identity.preview_len must be > 0"),
            ValidationError::EmptyGatewayFragment(idx) => {
                write!(f, "identity.gateways[{idx}].host_fragment is empty")
            }
            ValidationError::EmptyGatewayLabel(idx) => {
                write!(f, "identity.gateways[{idx}].label is empty")
            }
            ValidationError::MultipleApiKeyFallbacks => {
                write!(f, "more than one gateway has matches_api_key set")
            }
        }
    }
}

/// All problems found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Semantic validation of a parsed config.
pub fn validate_config(config: &ServiceConfig) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if config.listener.bind_address.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    } else if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.identity.preview_len == 0 {
        errors.push(ValidationError::ZeroPreviewLen);
    }

    for (idx, gateway) in config.identity.gateways.iter().enumerate() {
        if gateway.host_fragment.is_empty() {
            errors.push(ValidationError::EmptyGatewayFragment(idx));
        }
        if gateway.label.is_empty() {
            errors.push(ValidationError::EmptyGatewayLabel(idx));
        }
    }

    if config
        .identity
        .gateways
        .iter()
        .filter(|g| g.matches_api_key)
        .count()
        > 1
    {
        errors.push(ValidationError::MultipleApiKeyFallbacks);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
