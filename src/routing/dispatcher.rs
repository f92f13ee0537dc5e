//! Request dispatching.
//!
//! # Responsibilities
//! - Route a request by exact path and method to a handler
//! - Invoke the caller-identity inferencer once per request
//! - Shape the per-endpoint response envelope and status code
//!
//! # Design Decisions
//! - Any method is accepted on `/` and `/health`; only `/data`
//!   discriminates methods
//! - POST bodies must be JSON objects; arrays and scalars are rejected
//!   like any other malformed body

use axum::http::{HeaderMap, Method, StatusCode};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::config::IdentityConfig;
use crate::identity::{CallerInfo, Inferencer};
use crate::routing::envelope::{DataResponse, Envelope, HealthResponse, Reply};

const WELCOME_MESSAGE: &str = "Welcome to the IAM-authenticated REST API";

/// Routes requests and shapes responses. Pure per-request logic: one
/// instance is built at startup and shared read-only.
pub struct Dispatcher {
    inferencer: Inferencer,
}

impl Dispatcher {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            inferencer: Inferencer::new(config),
        }
    }

    /// Handle one request to completion. Always returns a reply; every
    /// error condition maps to a terminal status code.
    pub fn dispatch(&self, method: &Method, path: &str, headers: &HeaderMap, body: &[u8]) -> Reply {
        let caller = self.inferencer.infer(headers);
        tracing::info!(%method, path, caller = ?caller, "Processing request");

        match path {
            "/" => Reply::new(
                StatusCode::OK,
                self.data_envelope(WELCOME_MESSAGE, None, method, path, caller),
            ),

            "/health" => Reply::new(
                StatusCode::OK,
                Envelope::Health(HealthResponse {
                    status: "healthy".to_string(),
                    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                    message: "API is running successfully".to_string(),
                    caller: Some(caller),
                }),
            ),

            "/data" if *method == Method::GET => Reply::new(
                StatusCode::OK,
                self.data_envelope(
                    "Data retrieved successfully",
                    Some(sample_items()),
                    method,
                    path,
                    caller,
                ),
            ),

            "/data" if *method == Method::POST => {
                match serde_json::from_slice::<Map<String, Value>>(body) {
                    Ok(payload) => Reply::new(
                        StatusCode::CREATED,
                        self.data_envelope(
                            "Data received successfully",
                            Some(Value::Object(payload)),
                            method,
                            path,
                            caller,
                        ),
                    ),
                    Err(_) => Reply::new(
                        StatusCode::BAD_REQUEST,
                        self.data_envelope(
                            "Invalid JSON in request body",
                            None,
                            method,
                            path,
                            caller,
                        ),
                    ),
                }
            }

            "/data" => Reply::new(
                StatusCode::METHOD_NOT_ALLOWED,
                self.data_envelope(
                    &format!("Method {method} not allowed"),
                    None,
                    method,
                    path,
                    caller,
                ),
            ),

            _ => Reply::new(
                StatusCode::NOT_FOUND,
                self.data_envelope("Endpoint not found", None, method, path, caller),
            ),
        }
    }

    fn data_envelope(
        &self,
        message: &str,
        data: Option<Value>,
        method: &Method,
        path: &str,
        caller: CallerInfo,
    ) -> Envelope {
        Envelope::Data(DataResponse {
            message: message.to_string(),
            data,
            method: method.to_string(),
            path: path.to_string(),
            caller: Some(caller),
        })
    }
}

fn sample_items() -> Value {
    serde_json::json!({
        "items": ["item1", "item2", "item3"],
        "count": 3,
    })
}
