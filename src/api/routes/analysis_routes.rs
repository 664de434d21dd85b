//! Analysis Routes
//!
//! 文本打分与心情分类路由。

use crate::api::handlers::analysis_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建分析路由器
pub fn create_analysis_router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_text))
        .route("/analyze/draft", post(analyze_draft))
        .route("/moods", get(list_moods))
        .route("/moods/classify", get(classify_score))
}
