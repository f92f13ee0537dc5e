//! Request routing subsystem.
//!
//! # Data Flow
//! ```text
//! (method, path, headers, body)
//!     → dispatcher.rs (exact-path routing table)
//!     → identity inferencer (caller descriptor)
//!     → envelope.rs (JSON envelope, status code)
//!     → HTTP adapter serializes and responds
//! ```
//!
//! # Design Decisions
//! - The dispatcher is a pure function of the request plus startup
//!   config; no shared mutable state between requests
//! - Exact path matching only; the gateway's catch-all forwarding owns
//!   wildcard semantics
//! - Serialization failures degrade to a fixed 500 body, never a panic

pub mod dispatcher;
pub mod envelope;

pub use dispatcher::Dispatcher;
pub use envelope::Reply;
