//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Proxied request:
//!     → headers.rs (strip hop-by-hop, inject provider headers)
//!     → Forward to Frontend API
//! ```
//!
//! # Design Decisions
//! - The secret key only ever leaves through the proxied request headers
//! - No trust in client-supplied provider headers

pub mod headers;
