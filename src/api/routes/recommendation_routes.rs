//! Recommendation Routes

use crate::api::handlers::recommendation_handler::*;
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建推荐路由器
pub fn create_recommendation_router() -> Router<AppState> {
    Router::new()
        .route("/recommendations", post(recommend))
        .route("/recommendations/song", post(match_song))
        .route("/recommendations/gif", post(find_gif))
}
