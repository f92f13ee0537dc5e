//! Caller descriptor assembly.

use axum::http::{header, HeaderMap};

use crate::config::IdentityConfig;
use crate::identity::caller::{preview, CallerInfo};
use crate::identity::gateway::{build_chain, GatewayMatch, GatewayMatcher};
use crate::identity::role::extract_role_info;

/// Infers a [`CallerInfo`] descriptor from request headers.
///
/// Built once from config and consulted per request. Inference never
/// fails; for any header combination it returns a descriptor, at worst
/// one carrying only the unauthenticated label.
pub struct Inferencer {
    execution_role_arn: Option<String>,
    preview_len: usize,
    matchers: Vec<Box<dyn GatewayMatcher>>,
}

impl Inferencer {
    pub fn new(config: IdentityConfig) -> Self {
        let matchers = build_chain(&config);
        Self {
            execution_role_arn: config.execution_role_arn,
            preview_len: config.preview_len,
            matchers,
        }
    }

    /// Reconstruct the caller of a request, best-effort.
    pub fn infer(&self, headers: &HeaderMap) -> CallerInfo {
        let mut caller = CallerInfo::default();

        // Correlation: request id wins over trace id.
        if let Some(request_id) = header_str(headers, "x-request-id") {
            caller.principal_id = Some(format!("Request: {request_id}"));
        } else if let Some(trace_id) = header_str(headers, "x-amzn-trace-id") {
            caller.principal_id = Some(format!("Trace: {trace_id}"));
        }

        if let Some(stage) = header_str(headers, "x-stage") {
            caller.account_id = Some(format!("Stage: {stage}"));
        }

        let gateway = self.identify_gateway(headers);
        if let Some(matched) = &gateway {
            caller.user_arn = Some(matched.label.clone());
        }

        if let Some(token) = header_str(headers, "x-amz-security-token") {
            let role = extract_role_info(self.execution_role_arn.as_deref(), headers);
            match &role.name {
                Some(name) => {
                    caller.role_name = Some(name.clone());
                    caller.user_id = Some(format!("Role: {name}"));
                }
                None => {
                    caller.user_id =
                        Some(format!("Token: {}...", preview(token, self.preview_len)));
                }
            }
            caller.session_name = role.session;

            // The restricted gateway forces its role onto every caller,
            // even when a different role was parsed from the headers.
            if let Some(forced) = gateway.as_ref().and_then(|m| m.role_override.as_ref()) {
                caller.role_name = Some(forced.clone());
                caller.user_id = Some(format!("Role: {forced}"));
            }
        } else if let Some(auth) = header_str(headers, header::AUTHORIZATION.as_str()) {
            caller.user_id = Some(format!("{}...", preview(auth, self.preview_len)));
        } else if caller.user_arn.is_none() {
            caller.user_arn = Some("Unauthenticated Request".to_string());
        }

        caller
    }

    /// First matcher in the chain that claims the request. Requires a
    /// readable Host header; without one the request stays unlabeled.
    fn identify_gateway(&self, headers: &HeaderMap) -> Option<GatewayMatch> {
        let host = header_str(headers, header::HOST.as_str())?;
        self.matchers.iter().find_map(|m| m.identify(host, headers))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
