//! 编辑器草稿预览
//!
//! 输入过短时不做分析，直接视为中性，避免刚开始输入时背景频繁跳动。

use super::scorer::{Analysis, SentimentScorer};

/// 触发分析的最少字符数（不含）
pub const DEFAULT_MIN_CHARS: usize = 10;

/// 草稿预览：字符数不超过 `min_chars` 时返回中性结果
pub fn preview(scorer: &SentimentScorer<'_>, text: &str, min_chars: usize) -> Analysis {
    if text.chars().count() > min_chars {
        scorer.analyze(text)
    } else {
        Analysis::default()
    }
}
