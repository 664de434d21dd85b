//! 推荐 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::sentiment::MoodLabel;
use crate::services::recommendation::SongQuery;

/// 歌曲推荐请求
#[derive(Debug, Deserialize, Validate)]
pub struct SongRequest {
    #[validate(length(min = 1, message = "content cannot be empty"))]
    pub content: String,
    /// 心情标签，无法识别时按中性处理
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub sentiment: i64,
}

impl From<SongRequest> for SongQuery {
    fn from(request: SongRequest) -> Self {
        Self {
            mood: MoodLabel::from_str_or_neutral(&request.mood),
            content: request.content,
            sentiment: request.sentiment,
        }
    }
}

/// 动图搜索请求
#[derive(Debug, Deserialize, Validate)]
pub struct GifRequest {
    #[validate(length(min = 1, max = 200, message = "album must be 1-200 characters"))]
    pub album: String,
}

/// 动图搜索响应
#[derive(Debug, Serialize, Default)]
pub struct GifResponse {
    pub gif_url: Option<String>,
    pub gif_title: Option<String>,
    pub message: Option<String>,
}
