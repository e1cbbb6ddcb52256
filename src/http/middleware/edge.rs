//! Edge middleware.
//!
//! Frontend API traffic is proxied to the provider; everything else the
//! matcher selects goes through the authentication handler.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::{proxy_headers, rewrite_target};
use crate::http::response::ProxyError;
use crate::http::server::{EdgeState, Snapshot};
use crate::observability::metrics;
use crate::routing::Decision;

pub async fn edge_middleware(
    State(state): State<EdgeState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let snapshot = state.snapshot();
    let method = request.method().clone();
    let decision = snapshot.routes.decide(request.uri().path());

    tracing::debug!(
        method = %method,
        path = %request.uri().path(),
        decision = decision.as_str(),
        "Edge decision"
    );

    let response = match decision {
        Decision::Bypass => next.run(request).await,
        Decision::FrontendApi => proxy_frontend_api(&state, &snapshot, request).await,
        Decision::Authenticate => state.auth().handle(request, next).await,
    };

    metrics::record_request(
        decision.as_str(),
        method.as_str(),
        response.status().as_u16(),
        start_time,
    );
    response
}

/// Rewrite onto the provider host and forward with the provider headers set.
async fn proxy_frontend_api(
    state: &EdgeState,
    snapshot: &Snapshot,
    request: Request<Body>,
) -> Response {
    let api = &snapshot.config.frontend_api;
    let (parts, body) = request.into_parts();

    let headers = proxy_headers(&parts.headers, api);
    let target = match rewrite_target(&parts.uri, api, &snapshot.routes.marker) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, origin = %api.origin(), "Invalid Frontend API target");
            return ProxyError::from(e).into_response();
        }
    };

    tracing::debug!(url = %target, "Proxying to Frontend API");

    match state
        .client()
        .forward(parts.method, target, headers, body, snapshot.config.limits.max_body_size)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Frontend API request failed");
            metrics::record_upstream_error("frontend_api");
            e.into_response()
        }
    }
}
