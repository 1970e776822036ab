use anyhow::Context;
use mindmirror::api::{self, app_state::AppState};
use mindmirror::client::{HttpJournalApi, HttpReflectionClient};
use mindmirror::config::loader::{ConfigLoader, config_exists, default_config_path};
use mindmirror::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing,
    spawn_upstream_probes,
};
use mindmirror::services::{create_journal_service, create_reflection_service};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const PROBE_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let _log_guard = init_tracing(&config.logging, env!("CARGO_PKG_NAME"));

    info!("Starting MindMirror gateway ({})...", config.environment);
    if !config_exists() {
        warn!(
            "{} not found, using defaults and environment overrides",
            default_config_path().display()
        );
    }

    let journal_api = HttpJournalApi::from_config(&config.journal_api)?;
    info!("Journal API client initialized: {}", config.journal_api.base_url);

    let reflection_client = HttpReflectionClient::from_config(&config.reflection)?;
    info!(
        "Reflection client initialized: {} (enabled: {})",
        config.reflection.base_url, config.reflection.enabled
    );

    let journal_service = create_journal_service(Arc::new(journal_api));
    let reflection_service =
        create_reflection_service(Arc::new(reflection_client), config.reflection.enabled);

    let metrics = Arc::new(AppMetrics::default());
    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics.clone(),
    ));

    let mut probe_targets = vec![("journal_api".to_string(), config.journal_api.base_url.clone())];
    if config.reflection.enabled {
        probe_targets.push(("reflection".to_string(), config.reflection.base_url.clone()));
    }
    spawn_upstream_probes(observability_state.clone(), probe_targets, PROBE_INTERVAL);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState::new(config, journal_service, reflection_service, metrics);
    info!("Application state created");

    let router = create_observability_router(observability_state).merge(api::create_router(app_state));
    info!("API router created with observability endpoints");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
