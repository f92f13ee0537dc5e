//! Response envelopes and JSON rendering.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::identity::CallerInfo;

/// Fixed body returned when an envelope fails to serialize.
pub const INTERNAL_ERROR_BODY: &str = r#"{"message":"Internal server error"}"#;

/// Health endpoint envelope.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<CallerInfo>,
}

/// Envelope for the welcome and data endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<CallerInfo>,
}

/// One of the per-endpoint envelope schemas.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Health(HealthResponse),
    Data(DataResponse),
}

/// A routed response: status code plus the envelope to serialize.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl Reply {
    pub fn new(status: StatusCode, envelope: Envelope) -> Self {
        Self { status, envelope }
    }

    /// Serialize the envelope. A serialization fault is terminal for
    /// the request: it is logged in full server-side and surfaced as a
    /// generic 500, never propagated to the transport.
    pub fn render(&self) -> (StatusCode, Vec<u8>) {
        match serde_json::to_vec(&self.envelope) {
            Ok(body) => (self.status, body),
            Err(error) => {
                tracing::error!(%error, "Failed to encode response envelope");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_BODY.as_bytes().to_vec(),
                )
            }
        }
    }
}
