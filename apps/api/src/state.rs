use std::sync::Arc;
use std::time::Duration;

use crate::advisor::Advisor;
use crate::config::Config;
use crate::store::TrackerStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TrackerStore>,
    pub config: Config,
    /// Pluggable advisor. `LlmAdvisor` with an API key, `OfflineAdvisor` without.
    pub advisor: Arc<dyn Advisor>,
}

impl AppState {
    pub fn new(store: TrackerStore, config: Config, advisor: Arc<dyn Advisor>) -> Self {
        Self {
            store: Arc::new(store),
            config,
            advisor,
        }
    }

    /// Awaited by write handlers before they touch the store.
    pub async fn simulate_write_latency(&self) {
        let delay = self.config.simulated_write_delay_ms;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}
