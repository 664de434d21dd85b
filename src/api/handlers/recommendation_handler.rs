use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::recommendation_dto::*},
    error::AppError,
    security::validation::ValidatedJson,
    services::recommendation::SongQuery,
};

/// 直接返回推荐失败原因（500 未配置 / 502 上游错误）
pub async fn match_song(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SongRequest>,
) -> Result<impl IntoResponse, AppError> {
    let query = SongQuery::from(request);
    debug!("Matching song for mood={}, sentiment={}", query.mood, query.sentiment);

    let result = state.recommendation_service.match_song(&query).await;
    state.metrics.record_recommendation(result.is_err());

    Ok(Json(result?))
}

pub async fn find_gif(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GifRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !state.recommendation_service.gifs_configured() {
        return Ok(Json(GifResponse {
            message: Some("Giphy API key not configured".to_string()),
            ..Default::default()
        }));
    }

    let response = match state
        .recommendation_service
        .find_gif_or_none(&request.album)
        .await
    {
        Some(gif) => GifResponse {
            gif_url: Some(gif.url),
            gif_title: Some(gif.title),
            message: None,
        },
        None => GifResponse {
            message: Some(format!("No GIF found for {}", request.album)),
            ..Default::default()
        },
    };

    Ok(Json(response))
}

/// 歌曲 + 动图，失败时降级，始终返回 200
pub async fn recommend(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SongRequest>,
) -> Result<impl IntoResponse, AppError> {
    let recommendation = state
        .recommendation_service
        .recommend(&SongQuery::from(request))
        .await;
    state
        .metrics
        .record_recommendation(!recommendation.is_available());

    Ok(Json(recommendation))
}
