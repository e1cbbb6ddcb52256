//! Application upstream: the terminal handler behind the edge middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
};

use crate::http::request::{upstream_headers, upstream_target};
use crate::http::request_id::{RequestId, X_REQUEST_ID};
use crate::http::response::ProxyError;
use crate::http::server::EdgeState;
use crate::observability::metrics;

/// Forward the request to the configured application origin.
pub async fn upstream_handler(State(state): State<EdgeState>, request: Request<Body>) -> Response {
    let snapshot = state.snapshot();
    let (parts, body) = request.into_parts();

    let target = match upstream_target(&parts.uri, &snapshot.config.upstream.origin) {
        Ok(t) => t,
        Err(e) => return ProxyError::from(e).into_response(),
    };
    let mut headers = upstream_headers(&parts.headers);
    if let Some(id) = parts.extensions.get::<RequestId>() {
        headers
            .entry(X_REQUEST_ID)
            .or_insert_with(|| id.header_value().clone());
    }

    match state
        .client()
        .forward(parts.method, target, headers, body, snapshot.config.limits.max_body_size)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Application upstream request failed");
            metrics::record_upstream_error("application");
            e.into_response()
        }
    }
}
