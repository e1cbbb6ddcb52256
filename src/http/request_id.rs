//! Request ID handling.
//!
//! # Design Decisions
//! - The id lives in request extensions, never in the request headers, so
//!   the authentication handler sees exactly what the client sent
//! - A client-supplied `x-request-id` is reused
//! - The id is echoed on the response and recorded on the request span

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Identifier of one request as it passes through the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(HeaderValue);

impl RequestId {
    fn generate() -> Self {
        let id = Uuid::new_v4().hyphenated().to_string();
        Self(HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown")))
    }

    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or("unknown")
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }
}

/// Access to the id attached by [`request_id_middleware`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&RequestId> {
        self.extensions().get::<RequestId>()
    }
}

/// Attach a [`RequestId`] to the request extensions and echo it on the response.
pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = request
        .headers()
        .get(X_REQUEST_ID)
        .cloned()
        .map(RequestId)
        .unwrap_or_else(RequestId::generate);
    request.extensions_mut().insert(id.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(X_REQUEST_ID, id.0);
    response
}

/// Span for `TraceLayer`, carrying the request id.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request.request_id().map(RequestId::as_str).unwrap_or("unknown");
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    /// Reports what the handler saw: header presence and the extension id.
    async fn echo(request: Request<Body>) -> String {
        format!(
            "{}|{}",
            request.headers().contains_key(X_REQUEST_ID),
            request.request_id().map(RequestId::as_str).unwrap_or("none"),
        )
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(echo))
            .layer(middleware::from_fn(request_id_middleware))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn generated_id_stays_out_of_request_headers() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();

        let echoed = response.headers()[X_REQUEST_ID].to_str().unwrap().to_string();
        assert!(Uuid::parse_str(&echoed).is_ok());
        assert_eq!(body_text(response).await, format!("false|{}", echoed));
    }

    #[tokio::test]
    async fn client_id_is_reused() {
        let request = Request::builder()
            .uri("/")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.headers()[X_REQUEST_ID], "req-42");
        assert_eq!(body_text(response).await, "true|req-42");
    }
}
