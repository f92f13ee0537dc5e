//! Caller-identity inference subsystem.
//!
//! # Data Flow
//! ```text
//! request headers
//!     → gateway.rs (which front did this arrive through?)
//!     → role.rs (which role/session invoked it?)
//!     → inferencer.rs (assemble CallerInfo descriptor)
//!     → embedded into the response envelope
//! ```
//!
//! # Design Decisions
//! - Best-effort only: the gateway strips structured identity claims,
//!   so everything here is pattern matching over opaque proxy headers
//! - Inference never fails; missing or unreadable headers degrade to
//!   an emptier descriptor, never to an error
//! - The output is advisory and must never gate access decisions
//! - Gateway identification is an ordered matcher chain built from
//!   config, so deployed gateway ids are swappable data

pub mod caller;
pub mod gateway;
pub mod inferencer;
pub mod role;

pub use caller::CallerInfo;
pub use inferencer::Inferencer;
