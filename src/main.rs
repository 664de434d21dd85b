use anyhow::Context;
use mood_diary::api::{self, app_state::AppState};
use mood_diary::config::loader::ConfigLoader;
use mood_diary::observability::{AppMetrics, ObservabilityState, init_tracing};
use mood_diary::security::auth::ApiKeyAuth;
use mood_diary::services::{RecommendationService, create_journal_service};
use mood_diary::storage::StorageFactory;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let _log_guard = init_tracing(&config.logging);
    info!("Starting {} ({})...", config.app_name, config.environment);

    let store = StorageFactory::create(&config.database).await?;
    info!("Entry store initialized (backend: {:?})", config.database.backend);

    let journal_service = create_journal_service(store.clone(), config.journal.max_entry_length);
    info!("Journal service initialized");

    let recommendation_service = RecommendationService::from_config(&config.recommendation)?;
    info!(
        "Recommendation service initialized (songs: {}, gifs: {})",
        recommendation_service.songs_configured(),
        recommendation_service.gifs_configured()
    );

    let metrics = Arc::new(AppMetrics::default());
    let app_state = AppState::new(
        journal_service,
        recommendation_service,
        metrics.clone(),
        config.journal.clone(),
    );

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
        store,
    ));
    let auth = Arc::new(ApiKeyAuth::new(&config.security.api_key));
    let router =
        api::initialize_api(app_state, auth, observability_state, &config.server).await?;
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
