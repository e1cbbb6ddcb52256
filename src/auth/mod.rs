//! Authentication handler seam.
//!
//! Requests that are not Frontend API traffic are handed, untouched, to an
//! [`AuthHandler`]. What the handler does with them (session checks, header
//! enrichment, redirects) is its own business; the edge only guarantees it
//! sees the original request and a continuation to the application.

use std::future::Future;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use futures_util::future::BoxFuture;

/// An externally supplied authentication handler.
pub trait AuthHandler: Send + Sync + 'static {
    /// Handle `request`, calling `next` to reach the application.
    fn handle(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response>;
}

impl<F, Fut> AuthHandler for F
where
    F: Fn(Request<Body>, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn handle(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response> {
        Box::pin(self(request, next))
    }
}

/// Handler used when no vendor handler is wired in: forwards as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl AuthHandler for Passthrough {
    fn handle(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response> {
        Box::pin(next.run(request))
    }
}
