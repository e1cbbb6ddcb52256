//! Request rewriting for Frontend API traffic.
//!
//! # Responsibilities
//! - Resolve the client IP from runtime headers
//! - Build the provider header set for a proxied request
//! - Rewrite the request URI onto the provider host
//! - Address application traffic at the upstream origin
//!
//! # Design Decisions
//! - Pure functions over `http` types so the rewrite is testable without I/O
//! - Original request headers are copied, never mutated in place
//! - Provider headers are set after the copy so they always win

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::Uri;
use url::Url;

use crate::config::FrontendApiConfig;
use crate::routing::matcher::PathMarker;
use crate::security::headers::{
    strip_hop_by_hop, CLERK_PROXY_URL, CLERK_SECRET_KEY, X_FORWARDED_FOR, X_REAL_IP,
};

/// Client IP: `x-real-ip`, else the existing `x-forwarded-for`, else empty.
///
/// Repeated header lines are folded into one comma-separated value.
pub fn client_ip(headers: &HeaderMap) -> HeaderValue {
    joined(headers, X_REAL_IP)
        .or_else(|| joined(headers, X_FORWARDED_FOR))
        .unwrap_or_else(|| HeaderValue::from_static(""))
}

fn joined(headers: &HeaderMap, name: HeaderName) -> Option<HeaderValue> {
    let mut values = headers.get_all(name).iter();
    let first = values.next()?;
    let mut folded = first.as_bytes().to_vec();
    for value in values {
        folded.extend_from_slice(b", ");
        folded.extend_from_slice(value.as_bytes());
    }
    HeaderValue::from_bytes(&folded).ok()
}

/// Copy `original` and set the three provider headers.
///
/// Values that cannot be represented as a header fall back to the empty string.
pub fn proxy_headers(original: &HeaderMap, api: &FrontendApiConfig) -> HeaderMap {
    let forwarded_for = client_ip(original);

    let mut headers = original.clone();
    strip_hop_by_hop(&mut headers);
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);

    headers.insert(CLERK_PROXY_URL, header_or_empty(&api.proxy_url));
    headers.insert(CLERK_SECRET_KEY, header_or_empty(&api.secret_key));
    headers.insert(X_FORWARDED_FOR, forwarded_for);
    headers
}

fn header_or_empty(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Rewrite `uri` onto the provider origin, removing the marker once.
///
/// The query string is kept as-is.
pub fn rewrite_target(
    uri: &Uri,
    api: &FrontendApiConfig,
    marker: &PathMarker,
) -> Result<Url, url::ParseError> {
    let mut target = Url::parse(&api.origin())?;
    target.set_path(&marker.strip(uri.path()));
    target.set_query(uri.query());
    Ok(target)
}

/// Target for application traffic: same path and query on the upstream origin.
pub fn upstream_target(uri: &Uri, origin: &str) -> Result<Url, url::ParseError> {
    let mut target = Url::parse(origin)?;
    target.set_path(uri.path());
    target.set_query(uri.query());
    Ok(target)
}

/// Copy `original` for the application upstream, dropping hop-by-hop headers.
pub fn upstream_headers(original: &HeaderMap) -> HeaderMap {
    let mut headers = original.clone();
    strip_hop_by_hop(&mut headers);
    headers.remove(header::CONTENT_LENGTH);
    headers
}
