//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable holding the public proxy URL.
pub const PROXY_URL_ENV: &str = "NEXT_PUBLIC_CLERK_PROXY_URL";

/// Environment variable holding the provider secret key.
pub const SECRET_KEY_ENV: &str = "CLERK_SECRET_KEY";

/// Root configuration for the edge proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Frontend API target and injected credentials.
    pub frontend_api: FrontendApiConfig,

    /// Application the non-proxied traffic ends up at.
    pub upstream: UpstreamConfig,

    /// Which paths the edge middleware runs for.
    pub matcher: MatcherConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request limits.
    pub limits: LimitsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where marker traffic is sent and what it carries.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FrontendApiConfig {
    /// Reserved path marker (e.g., "/__clerk").
    pub path_marker: String,

    /// Provider API host, optionally with a port.
    pub host: String,

    /// Scheme used to reach the provider.
    pub scheme: String,

    /// Value of the `Clerk-Proxy-Url` header.
    /// Overridden by `NEXT_PUBLIC_CLERK_PROXY_URL`.
    pub proxy_url: String,

    /// Value of the `Clerk-Secret-Key` header.
    /// Overridden by `CLERK_SECRET_KEY`.
    #[serde(skip_serializing)]
    pub secret_key: String,
}

impl Default for FrontendApiConfig {
    fn default() -> Self {
        Self {
            path_marker: "/__clerk".to_string(),
            host: "frontend-api.clerk.dev".to_string(),
            scheme: "https".to_string(),
            proxy_url: String::new(),
            secret_key: String::new(),
        }
    }
}

impl FrontendApiConfig {
    /// Origin the rewritten requests are sent to (e.g. `https://frontend-api.clerk.dev`).
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// Application upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin of the application server (e.g., "http://127.0.0.1:3000").
    pub origin: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "http://127.0.0.1:3000".to_string(),
        }
    }
}

/// Static route matcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MatcherConfig {
    /// Path prefixes reserved for framework internals; never matched.
    pub excluded_prefixes: Vec<String>,

    /// File extensions treated as static assets; never matched.
    pub static_extensions: Vec<String>,

    /// Path prefixes always matched, even when they look static.
    /// The reserved path marker is always included on top of these.
    pub always_prefixes: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        let static_extensions = [
            "html", "htm", "css", "js", "mjs", "jpg", "jpeg", "webp", "png", "gif", "svg",
            "ttf", "woff", "woff2", "ico", "csv", "doc", "docx", "xls", "xlsx", "zip",
            "webmanifest",
        ];

        Self {
            excluded_prefixes: vec!["/_next".to_string()],
            static_extensions: static_extensions.iter().map(|e| e.to_string()).collect(),
            always_prefixes: vec!["/api".to_string(), "/trpc".to_string()],
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum body size in bytes buffered when forwarding.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}
