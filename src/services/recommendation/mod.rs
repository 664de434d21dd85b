//! 推荐服务
//!
//! 根据日记内容、心情与情感分推荐一首歌，再按专辑搜索一张动图。
//! 外部服务失败时降级为“暂无推荐”，不影响日记保存与打分。

pub mod gif;
pub mod song;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::config::config::RecommendationConfig;
use crate::error::Result;
use crate::sentiment::MoodLabel;

pub use gif::GiphyGifFinder;
pub use song::OpenAiSongMatcher;

pub const NO_RECOMMENDATION: &str = "No recommendation available";

/// 歌曲推荐请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongQuery {
    pub content: String,
    pub mood: MoodLabel,
    pub sentiment: i64,
}

/// 推荐的歌曲
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMatch {
    pub song_title: String,
    pub album: String,
    pub reason: String,
}

/// 动图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gif {
    pub url: String,
    pub title: String,
}

/// 组合推荐结果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendation {
    pub song: Option<SongMatch>,
    pub gif: Option<Gif>,
    /// 降级原因
    pub message: Option<String>,
}

impl Recommendation {
    pub fn unavailable() -> Self {
        Self {
            song: None,
            gif: None,
            message: Some(NO_RECOMMENDATION.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.song.is_some()
    }
}

/// 歌曲推荐端口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SongMatcher: Send + Sync {
    /// 是否已配置所需的密钥
    fn is_configured(&self) -> bool;

    async fn match_song(&self, query: &SongQuery) -> Result<SongMatch>;
}

/// 动图搜索端口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GifFinder: Send + Sync {
    fn is_configured(&self) -> bool;

    /// 按专辑搜索动图，未配置或无结果时返回 None
    async fn find_gif(&self, album: &str) -> Result<Option<Gif>>;
}

/// 推荐服务
#[derive(Clone)]
pub struct RecommendationService {
    songs: Arc<dyn SongMatcher>,
    gifs: Arc<dyn GifFinder>,
}

impl RecommendationService {
    pub fn new(songs: Arc<dyn SongMatcher>, gifs: Arc<dyn GifFinder>) -> Self {
        Self { songs, gifs }
    }

    /// 使用 OpenAI 与 Giphy 客户端创建
    pub fn from_config(config: &RecommendationConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(OpenAiSongMatcher::new(config)?),
            Arc::new(GiphyGifFinder::new(config)?),
        ))
    }

    pub fn songs_configured(&self) -> bool {
        self.songs.is_configured()
    }

    pub fn gifs_configured(&self) -> bool {
        self.gifs.is_configured()
    }

    pub async fn match_song(&self, query: &SongQuery) -> Result<SongMatch> {
        self.songs.match_song(query).await
    }

    /// 搜索动图，失败时记录日志并返回 None
    pub async fn find_gif_or_none(&self, album: &str) -> Option<Gif> {
        match self.gifs.find_gif(album).await {
            Ok(gif) => gif,
            Err(e) => {
                warn!("GIF lookup failed for album '{}': {}", album, e);
                None
            }
        }
    }

    /// 歌曲 + 动图，任何失败都降级而不返回错误
    pub async fn recommend(&self, query: &SongQuery) -> Recommendation {
        let song = match self.songs.match_song(query).await {
            Ok(song) => song,
            Err(e) => {
                warn!("Song recommendation unavailable: {}", e);
                return Recommendation::unavailable();
            }
        };

        let gif = self.find_gif_or_none(&song.album).await;
        Recommendation {
            song: Some(song),
            gif,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn query() -> SongQuery {
        SongQuery {
            content: "I love this! It is amazing!".to_string(),
            mood: MoodLabel::VeryPositive,
            sentiment: 5,
        }
    }

    fn song() -> SongMatch {
        SongMatch {
            song_title: "Shake It Off".to_string(),
            album: "1989".to_string(),
            reason: "Pure joy.".to_string(),
        }
    }

    #[test]
    fn test_song_match_wire_names() {
        let value = serde_json::to_value(song()).unwrap();
        assert_eq!(value["songTitle"], "Shake It Off");
        assert_eq!(value["album"], "1989");
    }

    #[tokio::test]
    async fn test_recommend_song_and_gif() {
        let mut songs = MockSongMatcher::new();
        songs
            .expect_match_song()
            .withf(|q| q.sentiment == 5 && q.mood == MoodLabel::VeryPositive)
            .returning(|_| Ok(song()));

        let mut gifs = MockGifFinder::new();
        gifs.expect_find_gif()
            .withf(|album| album.to_string() == "1989")
            .returning(|_| {
                Ok(Some(Gif {
                    url: "https://gif/1".to_string(),
                    title: "dance".to_string(),
                }))
            });

        let service = RecommendationService::new(Arc::new(songs), Arc::new(gifs));
        let recommendation = service.recommend(&query()).await;

        assert!(recommendation.is_available());
        assert_eq!(recommendation.song, Some(song()));
        assert_eq!(recommendation.gif.unwrap().url, "https://gif/1");
        assert!(recommendation.message.is_none());
    }

    #[tokio::test]
    async fn test_song_failure_degrades() {
        let mut songs = MockSongMatcher::new();
        songs
            .expect_match_song()
            .returning(|_| Err(AppError::Config("OpenAI API key not configured".into())));

        let mut gifs = MockGifFinder::new();
        gifs.expect_find_gif().never();

        let service = RecommendationService::new(Arc::new(songs), Arc::new(gifs));
        let recommendation = service.recommend(&query()).await;

        assert_eq!(recommendation, Recommendation::unavailable());
    }

    #[tokio::test]
    async fn test_gif_failure_keeps_song() {
        let mut songs = MockSongMatcher::new();
        songs.expect_match_song().returning(|_| Ok(song()));

        let mut gifs = MockGifFinder::new();
        gifs.expect_find_gif()
            .returning(|_| Err(AppError::Upstream("Giphy API error (500)".into())));

        let service = RecommendationService::new(Arc::new(songs), Arc::new(gifs));
        let recommendation = service.recommend(&query()).await;

        assert_eq!(recommendation.song, Some(song()));
        assert!(recommendation.gif.is_none());
    }
}
