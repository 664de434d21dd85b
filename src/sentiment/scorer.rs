//! 基于词典的情感打分
//!
//! 纯函数：同样的输入永远得到同样的结果，不读写任何外部状态。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::lexicon::{Lexicon, TokenKind};
use super::mood::{MoodLabel, classify};

/// 每个情感词的基础分值
const WORD_WEIGHT: f64 = 2.0;
const NORMAL_MULTIPLIER: f64 = 1.0;
const BOOSTED_MULTIPLIER: f64 = 1.5;
const EXCLAMATION_WEIGHT: f64 = 0.5;
const QUESTION_PENALTY: f64 = 0.3;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9']+").expect("word pattern is a valid regex"));

/// 打分结果
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentResult {
    /// 四舍五入后的整数情感分
    pub score: i64,
    /// 按词数归一化的分值，保留 4 位小数（截断）
    pub comparative: f64,
}

/// 带中间量的完整分析结果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Analysis {
    pub score: i64,
    pub comparative: f64,
    /// 取整前的累计分
    pub raw_total: f64,
    pub word_count: usize,
    pub exclamations: usize,
    pub questions: usize,
    pub mood: MoodLabel,
}

impl Analysis {
    pub fn result(&self) -> SentimentResult {
        SentimentResult {
            score: self.score,
            comparative: self.comparative,
        }
    }
}

/// 小写化后按 `[a-z0-9']+` 切词，去掉首尾撇号
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().trim_matches('\''))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// 情感打分器
#[derive(Debug, Clone, Copy)]
pub struct SentimentScorer<'a> {
    lexicon: &'a Lexicon,
}

impl Default for SentimentScorer<'static> {
    fn default() -> Self {
        Self::new(Lexicon::standard())
    }
}

impl<'a> SentimentScorer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn score(&self, text: &str) -> SentimentResult {
        self.analyze(text).result()
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        if text.trim().is_empty() {
            return Analysis::default();
        }

        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Analysis::default();
        }

        // 强化词只作用于紧随其后的一个词，且不叠加
        let (word_total, _) = tokens.iter().fold(
            (0.0_f64, NORMAL_MULTIPLIER),
            |(total, multiplier), token| match self.lexicon.classify_token(token) {
                TokenKind::Intensifier => (total, BOOSTED_MULTIPLIER),
                TokenKind::Positive => (total + WORD_WEIGHT * multiplier, NORMAL_MULTIPLIER),
                TokenKind::Negative => (total - WORD_WEIGHT * multiplier, NORMAL_MULTIPLIER),
                TokenKind::Neutral => (total, NORMAL_MULTIPLIER),
            },
        );

        let exclamations = text.matches('!').count();
        let questions = text.matches('?').count();

        let emphasis = EXCLAMATION_WEIGHT * exclamations as f64;
        let mut raw_total = if word_total > 0.0 {
            word_total + emphasis
        } else if word_total < 0.0 {
            word_total - emphasis
        } else {
            word_total
        };
        raw_total -= QUESTION_PENALTY * questions as f64;

        // f64::round 对 .5 远离零取整
        let score = raw_total.round() as i64;
        let comparative = truncate_4(raw_total / tokens.len() as f64);

        Analysis {
            score,
            comparative,
            raw_total,
            word_count: tokens.len(),
            exclamations,
            questions,
            mood: classify(score),
        }
    }
}

/// 截断到 4 位小数；先吸收 `-999.9999999999999` 这类浮点误差再截断
fn truncate_4(value: f64) -> f64 {
    let scaled = value * 10_000.0;
    let snapped = (scaled * 1e6).round() / 1e6;
    let truncated = snapped.trunc() / 10_000.0;
    if truncated == 0.0 { 0.0 } else { truncated }
}

/// 使用标准词典打分
pub fn score(text: &str) -> SentimentResult {
    SentimentScorer::default().score(text)
}

/// 使用标准词典做完整分析
pub fn analyze(text: &str) -> Analysis {
    SentimentScorer::default().analyze(text)
}
