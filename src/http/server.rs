//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the edge middleware and the application fallback
//! - Wire up ambient middleware (tracing, timeout, request ID)
//! - Hold the hot-swappable configuration snapshot
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{AuthHandler, Passthrough};
use crate::config::EdgeConfig;
use crate::http::client::UpstreamClient;
use crate::http::middleware::edge_middleware;
use crate::http::request_id::{make_request_span, request_id_middleware};
use crate::http::upstream::upstream_handler;
use crate::lifecycle::shutdown::ShutdownListener;
use crate::observability::metrics;
use crate::routing::Routes;

/// A configuration together with the routing rules compiled from it.
#[derive(Debug)]
pub struct Snapshot {
    pub config: EdgeConfig,
    pub routes: Routes,
}

impl Snapshot {
    pub fn new(config: EdgeConfig) -> Self {
        let routes = Routes::from_config(&config);
        Self { config, routes }
    }
}

/// Application state injected into the middleware and handlers.
#[derive(Clone)]
pub struct EdgeState {
    current: Arc<ArcSwap<Snapshot>>,
    client: UpstreamClient,
    auth: Arc<dyn AuthHandler>,
}

impl EdgeState {
    pub fn new(
        config: EdgeConfig,
        auth: Arc<dyn AuthHandler>,
    ) -> Result<Self, reqwest::Error> {
        let client = UpstreamClient::new(&config)?;
        Ok(Self {
            current: Arc::new(ArcSwap::from_pointee(Snapshot::new(config))),
            client,
            auth,
        })
    }

    /// Current configuration snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Swap in a new configuration for subsequent requests.
    ///
    /// Listener, metrics and client timeouts are fixed at startup.
    pub fn apply(&self, config: EdgeConfig) {
        if config.listener != self.current.load().config.listener {
            tracing::warn!("Listener changes require a restart; keeping current bind address");
        }
        self.current.store(Arc::new(Snapshot::new(config)));
        metrics::record_config_reload();
    }

    pub fn client(&self) -> &UpstreamClient {
        &self.client
    }

    pub fn auth(&self) -> &Arc<dyn AuthHandler> {
        &self.auth
    }
}

/// Edge routing without ambient layers: middleware plus application fallback.
pub fn edge_router(state: EdgeState) -> Router {
    Router::new()
        .fallback(upstream_handler)
        .layer(middleware::from_fn_with_state(state.clone(), edge_middleware))
        .with_state(state)
}

/// HTTP server for the edge proxy.
pub struct HttpServer {
    router: Router,
    state: EdgeState,
}

impl HttpServer {
    /// Create a server that delegates non-proxied traffic straight through.
    pub fn new(config: EdgeConfig) -> Result<Self, reqwest::Error> {
        Self::with_auth(config, Arc::new(Passthrough))
    }

    /// Create a server with an externally supplied authentication handler.
    pub fn with_auth(
        config: EdgeConfig,
        auth: Arc<dyn AuthHandler>,
    ) -> Result<Self, reqwest::Error> {
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let state = EdgeState::new(config, auth)?;
        let router = Self::build_router(state.clone(), request_timeout);
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// None of the ambient layers touch request headers.
    #[allow(deprecated)]
    fn build_router(state: EdgeState, request_timeout: Duration) -> Router {
        edge_router(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(middleware::from_fn(request_id_middleware))
    }

    /// Shared state, e.g. for applying reloaded configuration.
    pub fn state(&self) -> &EdgeState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
