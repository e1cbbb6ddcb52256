//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::load_config;
use crate::config::schema::EdgeConfig;

/// Callback receiving every configuration that loaded and validated.
pub type ApplyConfig = Arc<dyn Fn(EdgeConfig) + Send + Sync>;

/// A watcher that monitors the configuration file and publishes valid updates.
pub struct ConfigWatcher {
    path: PathBuf,
    apply: ApplyConfig,
}

impl ConfigWatcher {
    /// Create a watcher that hands reloaded configs to `apply`.
    pub fn new(path: &Path, apply: ApplyConfig) -> Self {
        Self {
            path: path.to_path_buf(),
            apply,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for reloads to continue.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let apply = self.apply.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        reload(&path, apply.as_ref());
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Load `path` and publish it; on failure the current config stays in place.
pub fn reload(path: &Path, apply: &(dyn Fn(EdgeConfig) + Send + Sync)) -> bool {
    match load_config(path) {
        Ok(new_config) => {
            apply(new_config);
            tracing::info!("Configuration reloaded");
            true
        }
        Err(e) => {
            tracing::error!("Failed to reload config: {}. Keeping current configuration.", e);
            false
        }
    }
}
