//! Header manipulation.
//!
//! # Responsibilities
//! - Name the provider headers injected into proxied requests
//! - Strip hop-by-hop headers in both directions
//!
//! # Design Decisions
//! - Headers named in `Connection` are treated as hop-by-hop too
//! - Client-supplied copies of the provider headers are always overwritten

use axum::http::header::{self, HeaderMap, HeaderName};

/// Public URL the provider should treat as the proxy origin.
pub const CLERK_PROXY_URL: HeaderName = HeaderName::from_static("clerk-proxy-url");

/// Secret key authenticating the proxy to the provider.
pub const CLERK_SECRET_KEY: HeaderName = HeaderName::from_static("clerk-secret-key");

/// Client IP as reported by the edge runtime.
pub const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Client IP forwarded to the provider.
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Remove hop-by-hop headers, including any listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn strips_standard_and_listed_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-hop"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert("x-hop", HeaderValue::from_static("1"));
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::COOKIE, HeaderValue::from_static("__session=abc"));

        strip_hop_by_hop(&mut headers);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[header::COOKIE], "__session=abc");
    }
}
