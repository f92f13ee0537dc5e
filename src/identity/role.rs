//! Role and session extraction from headers.
//!
//! Pattern matching over opaque vendor header formats. The parsers
//! here are heuristics over ARN-shaped strings; whatever they miss
//! simply stays unknown.

use axum::http::HeaderMap;

use crate::identity::caller::preview;

/// Headers scanned for role information, in priority order.
const CANDIDATE_HEADERS: [&str; 6] = [
    "authorization",
    "x-amz-user-agent",
    "x-amzn-requestcontext-identity-arn",
    "x-amzn-requestcontext-identity-userarn",
    "x-amzn-requestcontext-identity-user",
    "x-amzn-requestcontext-identity-principalid",
];

/// Values at or below this length are skipped entirely.
const MIN_SCAN_LEN: usize = 10;

/// Bounded prefix of a header value allowed into logs.
const MAX_LOGGED_CHARS: usize = 100;

/// Temporary-credential tokens start with this prefix.
const STS_TOKEN_PREFIX: &str = "IQoJ";

/// Sentinel role name for unparseable temporary credentials.
const STS_ROLE_SENTINEL: &str = "STS-AssumedRole";

/// Role and session names recovered from a request, when any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleInfo {
    pub name: Option<String>,
    pub session: Option<String>,
}

/// Best-effort extraction of the invoking role and session.
///
/// Tries, in order: the configured execution-role ARN, an
/// `assumed-role`/`role/` scan over the candidate headers, and the
/// temporary-credential prefix heuristic. Returns an empty `RoleInfo`
/// when nothing matches.
pub fn extract_role_info(execution_role_arn: Option<&str>, headers: &HeaderMap) -> RoleInfo {
    if let Some(arn) = execution_role_arn {
        if arn.contains("role/") {
            let name = arn
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            return RoleInfo {
                name,
                session: None,
            };
        }
    }

    for header in CANDIDATE_HEADERS {
        let Some(value) = headers.get(header).and_then(|v| v.to_str().ok()) else {
            continue;
        };
        if value.len() <= MIN_SCAN_LEN {
            continue;
        }

        tracing::debug!(
            header,
            value = preview(value, MAX_LOGGED_CHARS),
            "Checking header for role info"
        );

        // Look for assumed-role patterns in any header
        if value.contains("assumed-role") {
            let parts: Vec<&str> = value.split('/').collect();
            if let Some(pos) = parts.iter().position(|p| *p == "assumed-role") {
                if let Some(name) = parts.get(pos + 1) {
                    return RoleInfo {
                        name: (!name.is_empty()).then(|| (*name).to_string()),
                        session: parts
                            .get(pos + 2)
                            .filter(|s| !s.is_empty())
                            .map(|s| (*s).to_string()),
                    };
                }
            }
        }

        // Look for role name patterns
        if let Some(idx) = value.find("role/") {
            let remaining = &value[idx + 5..];
            let name = match remaining.find(['/', ',', ';', ' ']) {
                Some(end) => &remaining[..end],
                None => remaining,
            };
            return RoleInfo {
                name: (!name.is_empty()).then(|| name.to_string()),
                session: None,
            };
        }
    }

    // Temporary-credential tokens are not decodable here; label them.
    if let Some(token) = headers
        .get("x-amz-security-token")
        .and_then(|v| v.to_str().ok())
    {
        if token.starts_with(STS_TOKEN_PREFIX) {
            let mut session = None;
            if token.len() > 100 {
                if let Some(slice) = token.get(50..60) {
                    session = Some(format!("session-{slice}"));
                }
            }
            return RoleInfo {
                name: Some(STS_ROLE_SENTINEL.to_string()),
                session,
            };
        }
    }

    RoleInfo::default()
}
