//! Edge authentication proxy library.
//!
//! Proxies the reserved Frontend API path to the authentication provider and
//! hands every other matched request to an authentication handler.

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use auth::{AuthHandler, Passthrough};
pub use config::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
