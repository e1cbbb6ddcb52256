//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → RouteMatcher: does the edge middleware run at all?
//!         no  → application upstream
//!     → PathMarker: Frontend API traffic?
//!         yes → proxy to provider
//!         no  → authentication handler
//! ```
//!
//! # Design Decisions
//! - Patterns compiled once per config, immutable at runtime
//! - No regex in hot path (prefix and suffix checks only)
//! - Deterministic: same input always yields the same decision

pub mod matcher;

use crate::config::EdgeConfig;
use matcher::{PathMarker, RouteMatcher};

/// Where a request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Matcher excluded the path; straight to the application.
    Bypass,
    /// Reserved marker present; proxy to the Frontend API.
    FrontendApi,
    /// Everything else; the authentication handler decides.
    Authenticate,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Bypass => "bypass",
            Decision::FrontendApi => "frontend_api",
            Decision::Authenticate => "authenticate",
        }
    }
}

/// Compiled routing rules for one configuration.
#[derive(Debug, Clone)]
pub struct Routes {
    pub marker: PathMarker,
    pub matcher: RouteMatcher,
}

impl Routes {
    pub fn from_config(config: &EdgeConfig) -> Self {
        let marker = PathMarker::new(config.frontend_api.path_marker.clone());
        let matcher = RouteMatcher::new(&config.matcher, &marker);
        Self { marker, matcher }
    }

    pub fn decide(&self, path: &str) -> Decision {
        if !self.matcher.matches(path) {
            Decision::Bypass
        } else if self.marker.matches(path) {
            Decision::FrontendApi
        } else {
            Decision::Authenticate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decisions() {
        let routes = Routes::from_config(&EdgeConfig::default());
        assert_eq!(routes.decide("/__clerk/v1/client"), Decision::FrontendApi);
        assert_eq!(routes.decide("/dashboard"), Decision::Authenticate);
        assert_eq!(routes.decide("/api/me"), Decision::Authenticate);
        assert_eq!(routes.decide("/_next/static/app.js"), Decision::Bypass);
        assert_eq!(routes.decide("/logo.svg"), Decision::Bypass);
        assert_eq!(routes.decide("/docs/__clerk_setup"), Decision::Authenticate);
    }
}
