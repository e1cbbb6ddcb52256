//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and origins parse
//! - Reject credentials that can never travel as header values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Empty proxy URL / secret key are accepted (they degrade to empty headers)

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let api = &config.frontend_api;
    if !api.path_marker.starts_with('/') || api.path_marker.len() < 2 {
        errors.push(ValidationError::new(
            "frontend_api.path_marker",
            "must start with '/' and name a segment",
        ));
    }
    if !matches!(api.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::new(
            "frontend_api.scheme",
            format!("unsupported scheme '{}'", api.scheme),
        ));
    } else if Url::parse(&api.origin()).map(|u| u.host().is_none()).unwrap_or(true) {
        errors.push(ValidationError::new(
            "frontend_api.host",
            format!("'{}' is not a valid host", api.host),
        ));
    }
    if HeaderValue::from_str(&api.proxy_url).is_err() {
        errors.push(ValidationError::new(
            "frontend_api.proxy_url",
            "contains characters not allowed in a header value",
        ));
    }
    if HeaderValue::from_str(&api.secret_key).is_err() {
        errors.push(ValidationError::new(
            "frontend_api.secret_key",
            "contains characters not allowed in a header value",
        ));
    }

    match Url::parse(&config.upstream.origin) {
        Ok(url) if url.host().is_some() => {}
        _ => errors.push(ValidationError::new(
            "upstream.origin",
            format!("'{}' is not an absolute URL", config.upstream.origin),
        )),
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
