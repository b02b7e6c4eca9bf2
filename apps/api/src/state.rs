use std::sync::Arc;

use crate::config::Config;
use crate::latex::Extractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once from `FALLBACK_NAME`; extraction itself is stateless.
    pub extractor: Arc<Extractor>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let extractor = Arc::new(Extractor::new(config.fallback_name.clone()));
        AppState { config, extractor }
    }
}
