//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! service. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Caller-identity inference settings.
    pub identity: IdentityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Caller-identity inference settings.
///
/// The gateway table carries the deployment-specific host fragments the
/// inferencer matches against, so redeployed gateway ids can be swapped
/// without touching control flow.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Execution-role ARN of this process, when known. Seeded from
    /// `AWS_EXECUTION_ROLE_ARN` at startup if the file leaves it unset.
    pub execution_role_arn: Option<String>,

    /// Maximum number of characters of a token or Authorization value
    /// echoed back in the caller summary.
    pub preview_len: usize,

    /// Known gateway fronts, checked in order against the Host header.
    pub gateways: Vec<GatewayConfig>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            execution_role_arn: None,
            preview_len: 20,
            gateways: vec![
                GatewayConfig {
                    host_fragment: "7pxbysogui".to_string(),
                    label: "API A (Open Access)".to_string(),
                    role_override: None,
                    matches_api_key: false,
                },
                GatewayConfig {
                    host_fragment: "cqst45pam7".to_string(),
                    label: "API B (Restricted Access)".to_string(),
                    role_override: Some(
                        "aws-lambda-rest-iam-api-api-b-restricted-role".to_string(),
                    ),
                    matches_api_key: false,
                },
                GatewayConfig {
                    host_fragment: "vo9f4c6gj4".to_string(),
                    label: "API C (IAM + API Key)".to_string(),
                    role_override: None,
                    matches_api_key: true,
                },
            ],
        }
    }
}

/// One known gateway front.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Sub-domain fragment identifying this gateway in the Host header.
    pub host_fragment: String,

    /// Human-readable label reported as the caller's `user_arn`.
    pub label: String,

    /// Role name forced onto callers identified as coming through this
    /// gateway, overriding anything parsed from headers.
    #[serde(default)]
    pub role_override: Option<String>,

    /// Whether requests carrying an API key but no matching Host
    /// fragment are attributed to this gateway.
    #[serde(default)]
    pub matches_api_key: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
