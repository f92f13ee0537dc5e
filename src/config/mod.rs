//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; request handling never reads it
//!   from the environment
//! - All fields have defaults so an empty config file is valid
//! - Validation separates syntactic (serde) from semantic checks
//! - Deployment-specific gateway identifiers are data here, not code

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::GatewayConfig;
pub use schema::IdentityConfig;
pub use schema::ServiceConfig;
