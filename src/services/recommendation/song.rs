//! 歌曲推荐：基于 OpenAI Chat Completions

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{SongMatch, SongMatcher, SongQuery};
use crate::config::config::RecommendationConfig;
use crate::error::{AppError, Result};

/// OpenAI 歌曲推荐客户端
pub struct OpenAiSongMatcher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    artist: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl OpenAiSongMatcher {
    pub fn new(config: &RecommendationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            artist: config.artist.clone(),
        })
    }

    fn system_prompt(&self) -> String {
        format!(
            r#"You are a {artist} song recommendation expert. Based on the user's journal entry, mood, and sentiment score, recommend ONE {artist} song that perfectly matches their emotional state and the themes in their writing.

IMPORTANT:
- Only recommend actual {artist} songs (include album name)
- DO NOT include any song lyrics
- Explain why this song matches their entry in 2-3 sentences
- Reference the song's themes and emotional tone
- Be empathetic and encouraging

Format your response as JSON:
{{
  "songTitle": "Song Name",
  "album": "Album Name",
  "reason": "Why this song matches their mood and entry"
}}"#,
            artist = self.artist
        )
    }

    fn user_prompt(&self, query: &SongQuery) -> String {
        format!(
            "Journal Entry: \"{}\"\n\nMood: {}\nSentiment Score: {}\n\nWhat {} song matches this entry?",
            query.content, query.mood, query.sentiment, self.artist
        )
    }
}

/// 解析模型回复中的 JSON，容忍 ```json 代码块包裹
pub(crate) fn parse_song_reply(reply: &str) -> Result<SongMatch> {
    let trimmed = reply.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(body)
        .map_err(|e| AppError::Upstream(format!("Malformed song recommendation: {}", e)))
}

#[async_trait]
impl SongMatcher for OpenAiSongMatcher {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn match_song(&self, query: &SongQuery) -> Result<SongMatch> {
        if !self.is_configured() {
            return Err(AppError::Config(
                "OpenAI API key not configured".to_string(),
            ));
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": self.system_prompt() },
                    { "role": "user", "content": self.user_prompt(query) },
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Upstream("OpenAI returned no choices".to_string()))?;

        parse_song_reply(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::AppConfig;
    use crate::sentiment::MoodLabel;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query() -> SongQuery {
        SongQuery {
            content: "I am very sad".to_string(),
            mood: MoodLabel::Negative,
            sentiment: -3,
        }
    }

    fn matcher(base_url: &str, api_key: &str) -> OpenAiSongMatcher {
        let mut config = AppConfig::development().recommendation;
        config.openai_base_url = base_url.to_string();
        config.openai_api_key = api_key.to_string();
        OpenAiSongMatcher::new(&config).unwrap()
    }

    #[test]
    fn test_parse_song_reply() {
        let plain = r#"{"songTitle": "Clean", "album": "1989", "reason": "Hope."}"#;
        let fenced = format!("```json\n{}\n```", plain);

        assert_eq!(parse_song_reply(plain).unwrap().song_title, "Clean");
        assert_eq!(parse_song_reply(&fenced).unwrap().album, "1989");
        assert!(matches!(
            parse_song_reply("I recommend Clean"),
            Err(AppError::Upstream(_))
        ));
    }

    #[test]
    fn test_user_prompt_carries_mood_and_score() {
        let prompt = matcher("http://localhost", "k").user_prompt(&query());
        assert!(prompt.contains("\"I am very sad\""));
        assert!(prompt.contains("Mood: negative"));
        assert!(prompt.contains("Sentiment Score: -3"));
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let result = matcher("http://localhost", "").match_song(&query()).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_match_song() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({ "model": "gpt-3.5-turbo", "max_tokens": 300 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "{\"songTitle\":\"Clean\",\"album\":\"1989\",\"reason\":\"About healing.\"}"
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let song = matcher(&server.uri(), "sk-test")
            .match_song(&query())
            .await
            .unwrap();

        assert_eq!(song.song_title, "Clean");
        assert_eq!(song.album, "1989");
        assert_eq!(song.reason, "About healing.");
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({ "error": "rate limited" })),
            )
            .mount(&server)
            .await;

        let result = matcher(&server.uri(), "sk-test").match_song(&query()).await;
        match result {
            Err(AppError::Upstream(message)) => assert!(message.contains("429")),
            other => panic!("unexpected result: {:?}", other.map(|s| s.song_title)),
        }
    }
}
