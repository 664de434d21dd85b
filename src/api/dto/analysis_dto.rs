//! 分析 DTO
//!
//! 文本打分与心情分类相关的请求和响应数据结构。

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::sentiment::{Analysis, MoodLabel};

/// 文本分析请求
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    /// 待分析文本，允许为空
    #[validate(length(max = 100000, message = "text is too long"))]
    pub text: String,
}

/// 心情展示信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodInfo {
    pub label: MoodLabel,
    pub display_name: &'static str,
    pub emoji: &'static str,
    pub gradient: &'static str,
}

impl From<MoodLabel> for MoodInfo {
    fn from(mood: MoodLabel) -> Self {
        Self {
            label: mood,
            display_name: mood.display_name(),
            emoji: mood.emoji(),
            gradient: mood.gradient(),
        }
    }
}

/// 文本分析响应
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub score: i64,
    pub comparative: f64,
    pub mood: MoodLabel,
    pub word_count: usize,
    pub mood_info: MoodInfo,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            score: analysis.score,
            comparative: analysis.comparative,
            mood: analysis.mood,
            word_count: analysis.word_count,
            mood_info: analysis.mood.into(),
        }
    }
}

/// 分数分类查询参数
#[derive(Debug, Deserialize)]
pub struct ClassifyParams {
    pub score: i64,
}

/// 全部心情列表
#[derive(Debug, Serialize)]
pub struct MoodListResponse {
    pub moods: Vec<MoodInfo>,
}
