//! Path matching logic.
//!
//! # Responsibilities
//! - Detect the reserved path marker and strip it from proxied paths
//! - Decide whether the edge middleware runs for a path at all
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching
//! - Always-included prefixes win over static-asset exclusions

use crate::config::MatcherConfig;

/// The reserved path marker that selects Frontend API traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMarker {
    marker: String,
}

impl PathMarker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.marker
    }

    /// Returns true if the path starts with the marker.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.marker)
    }

    /// Remove the first occurrence of the marker, the leading one for a
    /// matching path.
    ///
    /// Later occurrences are left untouched. An emptied path becomes `/`.
    pub fn strip(&self, path: &str) -> String {
        let stripped = path.replacen(&self.marker, "", 1);
        if stripped.is_empty() {
            "/".to_string()
        } else if !stripped.starts_with('/') {
            format!("/{}", stripped)
        } else {
            stripped
        }
    }
}

/// Static pattern list deciding which paths the edge middleware handles.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    excluded_prefixes: Vec<String>,
    static_extensions: Vec<String>,
    always_prefixes: Vec<String>,
}

impl RouteMatcher {
    /// Build a matcher; `marker` is always added to the included prefixes.
    pub fn new(config: &MatcherConfig, marker: &PathMarker) -> Self {
        let mut always_prefixes = config.always_prefixes.clone();
        if !always_prefixes.iter().any(|p| p == marker.as_str()) {
            always_prefixes.push(marker.as_str().to_string());
        }

        Self {
            excluded_prefixes: config.excluded_prefixes.clone(),
            static_extensions: config
                .static_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            always_prefixes,
        }
    }

    /// Returns true if the middleware should run for this path.
    pub fn matches(&self, path: &str) -> bool {
        if self.always_prefixes.iter().any(|p| has_segment_prefix(path, p)) {
            return true;
        }
        if self.excluded_prefixes.iter().any(|p| has_segment_prefix(path, p)) {
            return false;
        }
        !self.is_static_asset(path)
    }

    fn is_static_asset(&self, path: &str) -> bool {
        let last_segment = path.rsplit('/').next().unwrap_or_default();
        match last_segment.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let ext = ext.to_ascii_lowercase();
                self.static_extensions.iter().any(|e| *e == ext)
            }
            _ => false,
        }
    }
}

/// `/api` matches `/api` and `/api/users`, but not `/apiary`.
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_matcher() -> RouteMatcher {
        RouteMatcher::new(&MatcherConfig::default(), &PathMarker::new("/__clerk"))
    }

    #[test]
    fn test_marker_detection() {
        let marker = PathMarker::new("/__clerk");
        assert!(marker.matches("/__clerk/v1/client"));
        assert!(marker.matches("/__clerk"));
        assert!(!marker.matches("/tenant/__clerk/v1/environment"));
        assert!(!marker.matches("/docs/__clerk_setup"));
        assert!(!marker.matches("/api/users"));
        assert!(!marker.matches("/__cler"));
    }

    #[test]
    fn test_marker_stripped_once() {
        let marker = PathMarker::new("/__clerk");
        assert_eq!(marker.strip("/__clerk/v1/client"), "/v1/client");
        assert_eq!(marker.strip("/__clerk/__clerk/x"), "/__clerk/x");
        assert_eq!(marker.strip("/__clerk"), "/");
        assert_eq!(marker.strip("/__clerk/v1/__clerk"), "/v1/__clerk");
    }

    #[test]
    fn test_framework_internals_excluded() {
        let matcher = default_matcher();
        assert!(!matcher.matches("/_next/static/chunks/main.js"));
        assert!(!matcher.matches("/_next/data/build/index.json"));
        assert!(!matcher.matches("/_next"));
    }

    #[test]
    fn test_static_files_excluded() {
        let matcher = default_matcher();
        assert!(!matcher.matches("/favicon.ico"));
        assert!(!matcher.matches("/images/Logo.PNG"));
        assert!(!matcher.matches("/fonts/inter.woff2"));
        assert!(!matcher.matches("/site.webmanifest"));
    }

    #[test]
    fn test_pages_matched() {
        let matcher = default_matcher();
        assert!(matcher.matches("/"));
        assert!(matcher.matches("/dashboard"));
        assert!(matcher.matches("/data.json"));
        assert!(matcher.matches("/.well-known/thing"));
        assert!(matcher.matches("/_nextish"));
    }

    #[test]
    fn test_always_included_prefixes() {
        let matcher = default_matcher();
        assert!(matcher.matches("/api/export.csv"));
        assert!(matcher.matches("/trpc/user.list"));
        assert!(matcher.matches("/__clerk/npm/clerk.browser.js"));
        assert!(!matcher.matches("/apiary/logo.png"));
    }

    #[test]
    fn test_custom_marker_always_included() {
        let config = MatcherConfig {
            excluded_prefixes: vec!["/assets".into()],
            static_extensions: vec![".js".into()],
            always_prefixes: vec![],
        };
        let matcher = RouteMatcher::new(&config, &PathMarker::new("/assets/auth"));
        assert!(matcher.matches("/assets/auth/clerk.js"));
        assert!(!matcher.matches("/assets/app.css"));
        assert!(!matcher.matches("/bundle.js"));
    }
}
