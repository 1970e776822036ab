use crate::config::config::AppConfig;
use crate::error::{AppError, Result};
use crate::observability::AppMetrics;
use crate::security::auth::TokenDecoder;
use crate::services::journal::JournalService;
use crate::services::reflection::ReflectionService;
use std::sync::Arc;

/// Application state containing all shared services and security components
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<AppConfig>,
    /// Journal service for entry CRUD and history snapshots
    pub journal_service: Arc<dyn JournalService>,
    /// Reflection service for the daily reflection
    pub reflection_service: Arc<ReflectionService>,
    /// Bearer token decoder used by the session middleware
    pub token_decoder: Arc<TokenDecoder>,
    /// Shared request and upstream counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.config.environment)
            .field("journal_service", &"Arc<dyn JournalService>")
            .field("reflection_service", &"Arc<ReflectionService>")
            .field("token_decoder", &self.token_decoder)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: AppConfig,
        journal_service: Box<dyn JournalService>,
        reflection_service: ReflectionService,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        let token_decoder = TokenDecoder::new(config.security.leeway_secs);

        Self {
            config: Arc::new(config),
            journal_service: Arc::from(journal_service),
            reflection_service: Arc::new(reflection_service),
            token_decoder: Arc::new(token_decoder),
            metrics,
        }
    }

    /// Number of entries kept in emotion and concern rankings
    pub fn top_n(&self) -> usize {
        self.config.insights.top_n
    }

    /// Count an upstream round trip; only transport and upstream failures count as failed
    pub fn track<T>(&self, result: Result<T>) -> Result<T> {
        let failed = matches!(result, Err(AppError::Upstream(_) | AppError::Timeout(_)));
        self.metrics.record_upstream_call(!failed);
        result
    }
}
