//! Gateway identification.
//!
//! # Responsibilities
//! - Decide which gateway front a request arrived through
//! - First match wins across an ordered chain of matchers
//!
//! # Design Decisions
//! - Matchers are built once from config; deployed gateway id
//!   fragments are data, not control flow
//! - The chain is only consulted when a readable Host header exists;
//!   without one the request stays unlabeled
//! - The catch-all matcher guarantees a label whenever Host is present

use std::fmt;

use axum::http::HeaderMap;

use crate::config::IdentityConfig;

/// Outcome of identifying the gateway front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayMatch {
    /// Label reported as the caller's `user_arn`.
    pub label: String,

    /// Role name this gateway forces onto its callers, if any.
    pub role_override: Option<String>,
}

/// Trait for attributing a request to a gateway front.
pub trait GatewayMatcher: Send + Sync + fmt::Debug {
    /// Returns the match when this request is attributable to the
    /// matcher's gateway.
    fn identify(&self, host: &str, headers: &HeaderMap) -> Option<GatewayMatch>;
}

/// Matches a known sub-domain fragment in the Host header.
#[derive(Debug, Clone)]
pub struct HostFragmentMatcher {
    fragment: String,
    label: String,
    role_override: Option<String>,
}

impl HostFragmentMatcher {
    pub fn new(
        fragment: impl Into<String>,
        label: impl Into<String>,
        role_override: Option<String>,
    ) -> Self {
        Self {
            fragment: fragment.into(),
            label: label.into(),
            role_override,
        }
    }
}

impl GatewayMatcher for HostFragmentMatcher {
    fn identify(&self, host: &str, _headers: &HeaderMap) -> Option<GatewayMatch> {
        host.contains(&self.fragment).then(|| GatewayMatch {
            label: self.label.clone(),
            role_override: self.role_override.clone(),
        })
    }
}

/// Attributes requests carrying an API key to the usage-plan gateway
/// when no Host fragment matched.
#[derive(Debug, Clone)]
pub struct ApiKeyMatcher {
    label: String,
    role_override: Option<String>,
}

impl ApiKeyMatcher {
    pub fn new(label: impl Into<String>, role_override: Option<String>) -> Self {
        Self {
            label: label.into(),
            role_override,
        }
    }
}

impl GatewayMatcher for ApiKeyMatcher {
    fn identify(&self, _host: &str, headers: &HeaderMap) -> Option<GatewayMatch> {
        headers.contains_key("x-api-key").then(|| GatewayMatch {
            label: self.label.clone(),
            role_override: self.role_override.clone(),
        })
    }
}

/// Labels anything that reached us through an unrecognized front.
#[derive(Debug, Clone, Default)]
pub struct CatchAllMatcher;

impl GatewayMatcher for CatchAllMatcher {
    fn identify(&self, host: &str, _headers: &HeaderMap) -> Option<GatewayMatch> {
        Some(GatewayMatch {
            label: format!("API Gateway: {host}"),
            role_override: None,
        })
    }
}

/// Build the ordered matcher chain from config: host fragments first,
/// then the API-key fallback, then the catch-all.
pub fn build_chain(config: &IdentityConfig) -> Vec<Box<dyn GatewayMatcher>> {
    let mut chain: Vec<Box<dyn GatewayMatcher>> = config
        .gateways
        .iter()
        .map(|g| {
            Box::new(HostFragmentMatcher::new(
                g.host_fragment.clone(),
                g.label.clone(),
                g.role_override.clone(),
            )) as Box<dyn GatewayMatcher>
        })
        .collect();

    if let Some(g) = config.gateways.iter().find(|g| g.matches_api_key) {
        chain.push(Box::new(ApiKeyMatcher::new(
            g.label.clone(),
            g.role_override.clone(),
        )));
    }

    chain.push(Box::new(CatchAllMatcher));
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn identify(chain: &[Box<dyn GatewayMatcher>], host: &str, headers: &HeaderMap) -> GatewayMatch {
        chain
            .iter()
            .find_map(|m| m.identify(host, headers))
            .expect("catch-all always matches")
    }

    #[test]
    fn host_fragment_matcher_checks_the_fragment() {
        let matcher = HostFragmentMatcher::new("cqst45pam7", "API B (Restricted Access)", None);
        let headers = HeaderMap::new();

        assert!(matcher
            .identify("cqst45pam7.execute-api.eu-west-1.amazonaws.com", &headers)
            .is_some());
        assert!(matcher.identify("other.example.com", &headers).is_none());
    }

    #[test]
    fn fragment_match_beats_api_key_fallback() {
        let chain = build_chain(&IdentityConfig::default());

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("secret"));

        let matched = identify(
            &chain,
            "7pxbysogui.execute-api.eu-west-1.amazonaws.com",
            &headers,
        );
        assert_eq!(matched.label, "API A (Open Access)");
    }

    #[test]
    fn api_key_fallback_beats_catch_all() {
        let chain = build_chain(&IdentityConfig::default());

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("secret"));

        let matched = identify(&chain, "unknown.example.com", &headers);
        assert_eq!(matched.label, "API C (IAM + API Key)");
    }

    #[test]
    fn unrecognized_host_falls_back_to_catch_all() {
        let chain = build_chain(&IdentityConfig::default());
        let headers = HeaderMap::new();

        let matched = identify(&chain, "unknown.example.com", &headers);
        assert_eq!(matched.label, "API Gateway: unknown.example.com");
        assert!(matched.role_override.is_none());
    }

    #[test]
    fn restricted_gateway_match_carries_the_role_override() {
        let chain = build_chain(&IdentityConfig::default());
        let headers = HeaderMap::new();

        let matched = identify(
            &chain,
            "cqst45pam7.execute-api.eu-west-1.amazonaws.com",
            &headers,
        );
        assert_eq!(matched.label, "API B (Restricted Access)");
        assert_eq!(
            matched.role_override.as_deref(),
            Some("aws-lambda-rest-iam-api-api-b-restricted-role")
        );
    }
}
