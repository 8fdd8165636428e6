mod advisor;
mod config;
mod errors;
mod extractors;
mod followup;
mod journeys;
mod llm_client;
mod models;
mod people;
mod reports;
mod routes;
mod state;
mod store;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::{Advisor, LlmAdvisor, OfflineAdvisor};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::TrackerStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shepherd API v{}", env!("CARGO_PKG_VERSION"));

    let store = TrackerStore::seeded();
    let (people, users) = store.read(|d| (d.people.len(), d.users.len()));
    info!("Tracker store seeded: {people} people, {users} users");

    let advisor = build_advisor(&config);
    info!("Advisor backend: {}", advisor.backend());

    if config.simulated_write_delay_ms > 0 {
        info!("Simulating {}ms write latency", config.simulated_write_delay_ms);
    }

    let state = AppState::new(store, config.clone(), advisor);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Claude-backed when a key is configured; otherwise every suggestion is the fallback text.
fn build_advisor(config: &Config) -> Arc<dyn Advisor> {
    let Some(api_key) = config.anthropic_api_key.clone() else {
        return Arc::new(OfflineAdvisor);
    };
    match LlmClient::new(api_key) {
        Ok(client) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmAdvisor(client))
        }
        Err(e) => {
            warn!("LLM client unavailable, suggestions will use the fallback: {e}");
            Arc::new(OfflineAdvisor)
        }
    }
}
