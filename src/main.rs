//! Edge authentication proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 EDGE PROXY                   │
//!   Client Request        │  ┌─────────┐    ┌──────────┐                 │
//!   ──────────────────────┼─▶│ matcher │───▶│  marker  │── yes ─▶ Frontend API
//!                         │  └────┬────┘    └────┬─────┘   (provider headers)
//!                         │       │ excluded       │ no                    │
//!                         │       │                ▼                       │
//!                         │       │          ┌──────────┐                  │
//!                         │       │          │   auth   │                  │
//!                         │       │          │ handler  │                  │
//!                         │       ▼          └────┬─────┘                  │
//!                         │  ┌───────────────────────────┐                 │
//!                         │  │   application upstream    │─────────────────┼──▶ App
//!                         │  └───────────────────────────┘                 │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use edge_auth_proxy::config::loader::{from_env, load_config};
use edge_auth_proxy::config::watcher::ConfigWatcher;
use edge_auth_proxy::observability::{logging, metrics};
use edge_auth_proxy::{lifecycle, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "edge-auth-proxy")]
#[command(about = "Edge proxy for the authentication provider's Frontend API", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults plus environment when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Reload the configuration file when it changes.
    #[arg(long, default_value_t = false)]
    watch: bool,
}

impl Cli {
    /// File to watch for hot reload; `--watch` without `--config` has none.
    fn watch_path(&self) -> Option<&Path> {
        match (&self.config, self.watch) {
            (Some(path), true) => Some(path),
            (None, true) => {
                tracing::warn!("--watch requires --config; hot reload disabled");
                None
            }
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => from_env()?,
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("edge-auth-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        frontend_api = %config.frontend_api.origin(),
        path_marker = %config.frontend_api.path_marker,
        upstream = %config.upstream.origin,
        proxy_url_set = !config.frontend_api.proxy_url.is_empty(),
        secret_key_set = !config.frontend_api.secret_key.is_empty(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    // Kept alive for the lifetime of the server.
    let _watcher = match cli.watch_path() {
        Some(path) => {
            let state = server.state().clone();
            let apply = Arc::new(move |mut new_config: edge_auth_proxy::EdgeConfig| {
                new_config.listener.bind_address = bind_address.clone();
                state.apply(new_config);
            });
            Some(ConfigWatcher::new(path, apply).run()?)
        }
        None => None,
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    lifecycle::signals::wait_for_signal(&shutdown).await;
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
