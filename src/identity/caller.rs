//! Caller descriptor embedded in response envelopes.

use serde::Serialize;

/// Best-effort description of the caller of a single request.
///
/// Every field is a derived, advisory string; none is authoritative
/// identity. Constructed fresh per request and discarded with the
/// response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallerInfo {
    /// Which gateway/context identified, or "Unauthenticated Request".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_arn: Option<String>,

    /// Role or token summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Repurposed to carry the deployment stage label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Request id or trace id for correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,

    /// Parsed role name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,

    /// Parsed role-session name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
}

/// Bounded prefix of a header value, so secrets are never echoed or
/// logged in full. Counts characters, not bytes, and therefore cannot
/// split a code point.
pub fn preview(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
