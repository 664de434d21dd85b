use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::analysis_dto::*},
    error::AppError,
    security::validation::ValidatedJson,
    sentiment::{MoodLabel, classify, draft},
};

pub async fn analyze_text(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let analysis = state.scorer().analyze(&request.text);
    debug!(
        "Analyzed {} words: score={}, mood={}",
        analysis.word_count, analysis.score, analysis.mood
    );

    state.metrics.record_analysis();
    Ok(Json(AnalyzeResponse::from(analysis)))
}

pub async fn analyze_draft(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let analysis = draft::preview(
        &state.scorer(),
        &request.text,
        state.journal_config.draft_min_chars,
    );

    state.metrics.record_analysis();
    Ok(Json(AnalyzeResponse::from(analysis)))
}

pub async fn list_moods() -> impl IntoResponse {
    Json(MoodListResponse {
        moods: MoodLabel::ALL.iter().copied().map(MoodInfo::from).collect(),
    })
}

pub async fn classify_score(Query(params): Query<ClassifyParams>) -> impl IntoResponse {
    Json(MoodInfo::from(classify(params.score)))
}
