use crate::config::config::JournalConfig;
use crate::observability::AppMetrics;
use crate::services::journal::JournalService;
use crate::services::recommendation::RecommendationService;
use crate::sentiment::SentimentScorer;
use std::sync::Arc;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Journal service for entry business logic
    pub journal_service: Arc<dyn JournalService>,
    /// Song and GIF recommendations
    pub recommendation_service: Arc<RecommendationService>,
    /// Request and domain counters
    pub metrics: Arc<AppMetrics>,
    /// Journal limits (entry length, draft threshold, page size)
    pub journal_config: JournalConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("journal_service", &"Arc<dyn JournalService>")
            .field("recommendation_service", &"Arc<RecommendationService>")
            .field("metrics", &self.metrics)
            .field("journal_config", &self.journal_config)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        journal_service: Box<dyn JournalService>,
        recommendation_service: RecommendationService,
        metrics: Arc<AppMetrics>,
        journal_config: JournalConfig,
    ) -> Self {
        Self {
            journal_service: Arc::from(journal_service),
            recommendation_service: Arc::new(recommendation_service),
            metrics,
            journal_config,
        }
    }

    /// Scorer over the standard lexicon
    pub fn scorer(&self) -> SentimentScorer<'static> {
        SentimentScorer::default()
    }
}
