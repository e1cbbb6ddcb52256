//! Response handling and transformation.
//!
//! # Responsibilities
//! - Convert upstream responses into client responses
//! - Strip hop-by-hop headers from upstream responses
//! - Map forwarding failures to HTTP status codes
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Upstream timeouts result in 504 Gateway Timeout
//! - Only an oversized request body is a 413; a body that fails to read is a 400
//! - Everything else upstream-related is a 502 Bad Gateway

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use http_body_util::LengthLimitError;
use serde_json::json;
use thiserror::Error;

use crate::security::headers::strip_hop_by_hop;

/// Failure while forwarding a request upstream.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid target URL: {0}")]
    InvalidTarget(#[from] url::ParseError),

    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ProxyError {
    /// Classify a body buffering failure from `axum::body::to_bytes`.
    pub fn from_body_error(err: axum::Error, limit: usize) -> Self {
        let over_limit = std::error::Error::source(&err)
            .is_some_and(|inner| inner.is::<LengthLimitError>());
        if over_limit {
            ProxyError::BodyTooLarge(limit)
        } else {
            ProxyError::Body(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidTarget(_) => StatusCode::BAD_GATEWAY,
            ProxyError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::Body(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("error"),
        }));
        (status, body).into_response()
    }
}

/// Stream an upstream response back to the client.
pub fn from_upstream(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
