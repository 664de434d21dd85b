use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sentiment::{MoodLabel, SentimentScorer};

/// 日记条目
///
/// 心情与情感分在创建时由打分核心计算，之后不再变化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// 条目唯一标识
    pub id: String,

    /// 正文（已去除首尾空白）
    pub content: String,

    /// 心情标签
    pub mood: MoodLabel,

    /// 整数情感分
    pub sentiment: i64,

    /// 归一化情感分
    pub comparative: f64,

    /// 创建时间，以毫秒时间戳存储以便排序
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl JournalEntry {
    /// 使用标准词典为正文打分并创建条目
    pub fn compose(content: &str) -> Self {
        Self::compose_with(&SentimentScorer::default(), content)
    }

    /// 使用指定打分器创建条目
    pub fn compose_with(scorer: &SentimentScorer<'_>, content: &str) -> Self {
        let content = content.trim();
        let analysis = scorer.analyze(content);
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            mood: analysis.mood,
            sentiment: analysis.score,
            comparative: analysis.comparative,
            timestamp: Utc::now(),
        }
    }

    /// 毫秒时间戳
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_scores_and_trims() {
        let entry = JournalEntry::compose("   I love this! It is amazing!\n");

        assert_eq!(entry.content, "I love this! It is amazing!");
        assert_eq!(entry.sentiment, 5);
        assert_eq!(entry.mood, MoodLabel::VeryPositive);
        assert_eq!(entry.comparative, 0.8333);
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn test_compose_assigns_unique_ids() {
        let a = JournalEntry::compose("a quiet day");
        let b = JournalEntry::compose("a quiet day");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialized_shape() {
        let entry = JournalEntry::compose("I am very sad");
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["mood"], "negative");
        assert_eq!(value["sentiment"], -3);
        assert_eq!(value["timestamp"], entry.timestamp_ms());

        let back: JournalEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back.id, entry.id);
        assert_eq!(back.timestamp_ms(), entry.timestamp_ms());
    }
}
