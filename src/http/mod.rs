//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, ambient layers)
//!     → request_id.rs (id in extensions, echoed on response)
//!     → middleware/edge.rs (matcher, marker check)
//!         → request.rs (provider headers, URL rewrite)
//!         → client.rs (forward to Frontend API)
//!         or auth handler → upstream.rs (forward to application)
//!     → response.rs (stream back, map failures)
//!     → Send to client
//! ```

pub mod client;
pub mod middleware;
pub mod request;
pub mod request_id;
pub mod response;
pub mod server;
pub mod upstream;

pub use request_id::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::ProxyError;
pub use server::{edge_router, EdgeState, HttpServer};
