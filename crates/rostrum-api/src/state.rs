//! Shared application state for API handlers.

use std::sync::Arc;

use rostrum_orchestrator::Settings;

use crate::config::ApiConfig;

/// State shared across API handlers.
///
/// Each debate request builds its own session from the base settings;
/// sessions are never shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// API server configuration.
    pub config: ApiConfig,
    /// Base settings debates are constructed from.
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Creates application state from config and base settings.
    pub fn new(config: ApiConfig, settings: Settings) -> Self {
        Self {
            config,
            settings: Arc::new(settings),
        }
    }
}
