//! IAM Gateway Identity Echo Service Library

pub mod config;
pub mod http;
pub mod identity;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
