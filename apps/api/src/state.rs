use std::sync::Arc;

use crate::config::Config;
use crate::generation::service::GenerationService;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable generation backend. Chosen at startup: remote proxy, in-process Claude, or none.
    pub generator: Arc<dyn GenerationService>,
    pub config: Config,
}

impl AppState {
    pub fn new(generator: Arc<dyn GenerationService>, config: Config) -> Self {
        AppState {
            sessions: SessionStore::new(),
            generator,
            config,
        }
    }
}
