//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request path and config reloads produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every request span
//! - Secret key never appears in logs or metric labels

pub mod logging;
pub mod metrics;
