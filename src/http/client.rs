//! Upstream HTTP client.
//!
//! Shared by the Frontend API proxy and the application upstream. One
//! connection pool for the whole process.

use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderMap, Method},
    response::Response,
};
use url::Url;

use crate::config::EdgeConfig;
use crate::http::response::{from_upstream, ProxyError};

/// Thin wrapper over `reqwest::Client` that speaks axum bodies.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    inner: reqwest::Client,
}

impl UpstreamClient {
    /// Build a client honoring the configured timeouts.
    ///
    /// Redirects are passed through to the caller rather than followed.
    pub fn new(config: &EdgeConfig) -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()?;
        Ok(Self { inner })
    }

    /// Send a request with a buffered body and stream the response back.
    pub async fn forward(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Body,
        max_body_size: usize,
    ) -> Result<Response, ProxyError> {
        let bytes = axum::body::to_bytes(body, max_body_size)
            .await
            .map_err(|e| ProxyError::from_body_error(e, max_body_size))?;

        let upstream = self
            .inner
            .request(method, url)
            .headers(headers)
            .body(bytes)
            .send()
            .await?;

        Ok(from_upstream(upstream))
    }
}
