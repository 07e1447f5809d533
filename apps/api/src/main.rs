mod config;
mod content;
mod errors;
mod extract;
mod generation;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::service::{
    GenerationService, LlmGenerationService, RemoteGenerationService,
    UnavailableGenerationService,
};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvforge v{}", env!("CARGO_PKG_VERSION"));

    let generator = build_generator(&config)?;
    info!("Generation backend: {}", generator.backend());
    info!("Preview scale: {}", config.preview_scale);

    let state = AppState::new(generator, config.clone());
    spawn_session_sweeper(&state, config.session_ttl_minutes);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Evicts idle sessions once a minute. A TTL of zero disables eviction.
fn spawn_session_sweeper(state: &AppState, ttl_minutes: u64) {
    if ttl_minutes == 0 {
        info!("Session eviction disabled");
        return;
    }
    let sessions = state.sessions.clone();
    let minutes = u32::try_from(ttl_minutes).unwrap_or(u32::MAX);
    let max_idle = chrono::Duration::minutes(i64::from(minutes));
    info!("Sessions expire after {ttl_minutes} idle minutes");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle(max_idle).await;
            if evicted > 0 {
                info!(evicted, "evicted idle sessions");
            }
        }
    });
}

/// Remote endpoint first, then the in-process client, else a backend that always fails.
fn build_generator(config: &Config) -> Result<Arc<dyn GenerationService>> {
    if let Some(endpoint) = &config.generation_endpoint {
        info!("Using remote generation endpoint {endpoint}");
        return Ok(Arc::new(RemoteGenerationService::new(endpoint.clone())?));
    }
    if let Some(key) = &config.anthropic_api_key {
        let llm = LlmClient::new(key.clone())?;
        info!("LLM client initialized (model: {})", llm_client::MODEL);
        return Ok(Arc::new(LlmGenerationService(llm)));
    }
    warn!("No generation backend configured; generation requests will fail");
    Ok(Arc::new(UnavailableGenerationService))
}
