//! 情感词典
//!
//! 正面词、负面词与强化词三个互不相交的集合，进程内只构建一次，之后只读共享。

use once_cell::sync::Lazy;
use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "love", "loved", "loves", "loving", "excellent", "amazing", "wonderful", "fantastic",
    "great", "good", "best", "better", "happy", "happiness", "joy", "joyful", "excited",
    "exciting", "perfect", "beautiful", "brilliant", "awesome", "incredible", "outstanding",
    "fabulous", "delightful", "superb", "pleasant", "pleased", "grateful", "thankful",
    "blessed", "lucky", "proud", "success", "successful", "celebrate", "fun", "enjoy",
    "hope", "hopeful", "optimistic", "positive", "peaceful", "calm", "relaxed", "content",
    "satisfied", "inspire", "inspired", "uplifting", "cheerful", "laugh", "laughing",
    "smile", "smiling", "win", "winning", "won", "achievement", "accomplish", "accomplished",
];

const NEGATIVE_WORDS: &[&str] = &[
    "hate", "hated", "hates", "hating", "terrible", "awful", "horrible", "bad", "worst",
    "worse", "sad", "sadness", "depressed", "depression", "miserable", "upset", "angry",
    "anger", "frustrated", "frustration", "disappointed", "disappointing", "fail", "failed",
    "failure", "pain", "painful", "hurt", "hurting", "stressed", "stress", "anxious",
    "anxiety", "worried", "worry", "fear", "afraid", "scared", "nervous", "hopeless",
    "helpless", "tired", "exhausted", "lonely", "alone", "cry", "crying", "tears",
    "lose", "losing", "lost", "miss", "missing", "difficult", "hard", "struggle",
    "struggling", "problem", "problems", "issue", "issues", "wrong", "mistake", "regret",
];

const INTENSIFIER_WORDS: &[&str] = &[
    "very", "extremely", "really", "so", "super", "absolutely", "completely",
];

static STANDARD: Lazy<Lexicon> =
    Lazy::new(|| Lexicon::new(POSITIVE_WORDS, NEGATIVE_WORDS, INTENSIFIER_WORDS));

/// 单个词元在词典中的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// 强化词，放大下一个情感词
    Intensifier,
    /// 正面词
    Positive,
    /// 负面词
    Negative,
    /// 不携带情感的普通词
    Neutral,
}

/// 情感词典
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    intensifier: HashSet<&'static str>,
}

impl Lexicon {
    /// 由三组词表构建词典，词表应为小写
    pub fn new(
        positive: &[&'static str],
        negative: &[&'static str],
        intensifier: &[&'static str],
    ) -> Self {
        Self {
            positive: positive.iter().copied().collect(),
            negative: negative.iter().copied().collect(),
            intensifier: intensifier.iter().copied().collect(),
        }
    }

    /// 内置的标准词典
    pub fn standard() -> &'static Lexicon {
        &STANDARD
    }

    /// 判断词元类别，强化词优先
    pub fn classify_token(&self, token: &str) -> TokenKind {
        if self.is_intensifier(token) {
            TokenKind::Intensifier
        } else if self.is_positive(token) {
            TokenKind::Positive
        } else if self.is_negative(token) {
            TokenKind::Negative
        } else {
            TokenKind::Neutral
        }
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    pub fn is_intensifier(&self, token: &str) -> bool {
        self.intensifier.contains(token)
    }

    /// 三个集合的大小 (正面, 负面, 强化)
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.positive.len(), self.negative.len(), self.intensifier.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_lexicon_sets_are_disjoint() {
        let lexicon = Lexicon::standard();

        for word in POSITIVE_WORDS {
            assert!(!lexicon.is_negative(word), "{word} is both positive and negative");
            assert!(!lexicon.is_intensifier(word));
        }
        for word in NEGATIVE_WORDS {
            assert!(!lexicon.is_positive(word), "{word} is both negative and positive");
            assert!(!lexicon.is_intensifier(word));
        }
    }

    #[test]
    fn test_standard_lexicon_sizes() {
        assert_eq!(Lexicon::standard().sizes(), (62, 64, 7));
    }

    #[test]
    fn test_classify_token() {
        let lexicon = Lexicon::standard();

        assert_eq!(lexicon.classify_token("very"), TokenKind::Intensifier);
        assert_eq!(lexicon.classify_token("happy"), TokenKind::Positive);
        assert_eq!(lexicon.classify_token("sad"), TokenKind::Negative);
        assert_eq!(lexicon.classify_token("table"), TokenKind::Neutral);
        // 词典只包含小写词
        assert_eq!(lexicon.classify_token("Happy"), TokenKind::Neutral);
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = Lexicon::new(&["sunny"], &["rainy"], &["quite"]);

        assert_eq!(lexicon.classify_token("sunny"), TokenKind::Positive);
        assert_eq!(lexicon.classify_token("rainy"), TokenKind::Negative);
        assert_eq!(lexicon.classify_token("quite"), TokenKind::Intensifier);
        assert_eq!(lexicon.classify_token("happy"), TokenKind::Neutral);
    }
}
