//! 情感分析核心
//!
//! 词典 → 打分器 → 心情分类。全部为无状态纯函数，可在任意线程并发调用。

pub mod draft;
pub mod lexicon;
pub mod mood;
pub mod scorer;

pub use draft::preview;
pub use lexicon::{Lexicon, TokenKind};
pub use mood::{MoodLabel, UnknownMood, classify};
pub use scorer::{Analysis, SentimentResult, SentimentScorer, analyze, score, tokenize};
