//! 动图搜索：基于 Giphy

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{Gif, GifFinder};
use crate::config::config::RecommendationConfig;
use crate::error::{AppError, Result};

const FALLBACK_LIMIT: usize = 5;

/// 专辑 → 时期名称，用于得到更贴切的搜索结果
const TAYLOR_SWIFT_ERAS: &[(&str, &str)] = &[
    ("Taylor Swift", "debut"),
    ("Fearless", "Fearless"),
    ("Speak Now", "Speak Now"),
    ("Red", "Red"),
    ("1989", "1989"),
    ("reputation", "reputation"),
    ("Lover", "Lover"),
    ("folklore", "folklore"),
    ("evermore", "evermore"),
    ("Midnights", "Midnights"),
    ("The Tortured Poets Department", "TTPD"),
    ("Fearless (Taylor's Version)", "Fearless"),
    ("Red (Taylor's Version)", "Red"),
    ("Speak Now (Taylor's Version)", "Speak Now"),
    ("1989 (Taylor's Version)", "1989"),
];

#[derive(Deserialize)]
struct GiphySearchResponse {
    #[serde(default)]
    data: Vec<GiphyGif>,
}

#[derive(Deserialize)]
struct GiphyGif {
    #[serde(default)]
    title: String,
    images: GiphyImages,
}

#[derive(Deserialize)]
struct GiphyImages {
    fixed_height: GiphyImage,
}

#[derive(Deserialize)]
struct GiphyImage {
    url: String,
}

impl From<GiphyGif> for Gif {
    fn from(gif: GiphyGif) -> Self {
        Gif {
            url: gif.images.fixed_height.url,
            title: gif.title,
        }
    }
}

/// Giphy 动图搜索客户端
pub struct GiphyGifFinder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    artist: String,
    search_limit: usize,
    pick_window: usize,
}

impl GiphyGifFinder {
    pub fn new(config: &RecommendationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.giphy_base_url.trim_end_matches('/').to_string(),
            api_key: config.giphy_api_key.clone(),
            artist: config.artist.clone(),
            search_limit: config.gif_search_limit,
            pick_window: config.gif_pick_window.max(1),
        })
    }

    /// 专辑对应的搜索词
    pub fn search_term(&self, album: &str) -> String {
        if self.artist == "Taylor Swift" {
            if let Some((_, era)) = TAYLOR_SWIFT_ERAS.iter().find(|(name, _)| *name == album) {
                return format!("{} {} era", self.artist, era);
            }
        }
        format!("{} {}", self.artist, album)
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<GiphyGif>> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("{}/gifs/search", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("q", term),
                ("limit", limit.as_str()),
                ("rating", "g"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!("Giphy API error ({})", status)));
        }

        let body: GiphySearchResponse = response.json().await?;
        Ok(body.data)
    }
}

#[async_trait]
impl GifFinder for GiphyGifFinder {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn find_gif(&self, album: &str) -> Result<Option<Gif>> {
        if !self.is_configured() {
            debug!("Giphy API key not configured, skipping GIF lookup");
            return Ok(None);
        }

        let term = self.search_term(album);
        let mut results = self.search(&term, self.search_limit).await?;

        if !results.is_empty() {
            let window = results.len().min(self.pick_window);
            let index = rand::thread_rng().gen_range(0..window);
            return Ok(Some(results.swap_remove(index).into()));
        }

        debug!("No GIFs for '{}', falling back to '{}'", term, self.artist);
        let fallback = self.search(&self.artist, FALLBACK_LIMIT).await?;
        Ok(fallback.into_iter().next().map(Gif::from))
    }
}
