//! 心情分类
//!
//! 将整数情感分映射为五档心情标签，并提供前端渲染所需的展示信息。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 心情标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoodLabel {
    VeryPositive,
    Positive,
    #[default]
    Neutral,
    Negative,
    VeryNegative,
}

impl MoodLabel {
    /// 全部心情，从最积极到最消极
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::VeryPositive,
        MoodLabel::Positive,
        MoodLabel::Neutral,
        MoodLabel::Negative,
        MoodLabel::VeryNegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::VeryPositive => "very-positive",
            MoodLabel::Positive => "positive",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Negative => "negative",
            MoodLabel::VeryNegative => "very-negative",
        }
    }

    /// 展示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            MoodLabel::VeryPositive => "Very Positive",
            MoodLabel::Positive => "Positive",
            MoodLabel::Neutral => "Neutral",
            MoodLabel::Negative => "Negative",
            MoodLabel::VeryNegative => "Very Negative",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoodLabel::VeryPositive => "🌟",
            MoodLabel::Positive => "😊",
            MoodLabel::Neutral => "😐",
            MoodLabel::Negative => "😔",
            MoodLabel::VeryNegative => "😢",
        }
    }

    /// 心情戒指式的背景渐变（CSS）
    pub fn gradient(&self) -> &'static str {
        match self {
            MoodLabel::VeryPositive => {
                "linear-gradient(135deg, #FFD93D 0%, #FF9A3D 50%, #FF6B9D 100%)"
            }
            MoodLabel::Positive => "linear-gradient(135deg, #6BCF7F 0%, #4ECDC4 50%, #44A8F2 100%)",
            MoodLabel::Neutral => "linear-gradient(135deg, #A8B4F5 0%, #C8AFF0 50%, #D4A5F6 100%)",
            MoodLabel::Negative => "linear-gradient(135deg, #667EEA 0%, #764BA2 50%, #8B5CF6 100%)",
            MoodLabel::VeryNegative => {
                "linear-gradient(135deg, #434343 0%, #5B4F8A 50%, #2D3561 100%)"
            }
        }
    }

    /// 解析标签，无法识别时回退为 Neutral
    pub fn from_str_or_neutral(value: &str) -> Self {
        value.parse().unwrap_or(MoodLabel::Neutral)
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知心情标签
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood label: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for MoodLabel {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodLabel::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// 按固定阈值将情感分映射为心情，先匹配者优先
pub fn classify(score: i64) -> MoodLabel {
    if score >= 5 {
        MoodLabel::VeryPositive
    } else if score >= 2 {
        MoodLabel::Positive
    } else if score <= -5 {
        MoodLabel::VeryNegative
    } else if score <= -2 {
        MoodLabel::Negative
    } else {
        MoodLabel::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, MoodLabel::VeryPositive)]
    #[case(5, MoodLabel::VeryPositive)]
    #[case(4, MoodLabel::Positive)]
    #[case(2, MoodLabel::Positive)]
    #[case(1, MoodLabel::Neutral)]
    #[case(0, MoodLabel::Neutral)]
    #[case(-1, MoodLabel::Neutral)]
    #[case(-2, MoodLabel::Negative)]
    #[case(-4, MoodLabel::Negative)]
    #[case(-5, MoodLabel::VeryNegative)]
    #[case(-100, MoodLabel::VeryNegative)]
    fn test_classify_boundaries(#[case] score: i64, #[case] expected: MoodLabel) {
        assert_eq!(classify(score), expected);
    }

    #[test]
    fn test_label_strings_round_trip() {
        for mood in MoodLabel::ALL {
            assert_eq!(mood.to_string().parse::<MoodLabel>(), Ok(mood));
        }
        assert_eq!(
            serde_json::to_string(&MoodLabel::VeryNegative).unwrap(),
            "\"very-negative\""
        );
    }

    #[test]
    fn test_unknown_label_falls_back_to_neutral() {
        assert!("ecstatic".parse::<MoodLabel>().is_err());
        assert_eq!(MoodLabel::from_str_or_neutral("ecstatic"), MoodLabel::Neutral);
        assert_eq!(MoodLabel::from_str_or_neutral("positive"), MoodLabel::Positive);
    }

    #[test]
    fn test_presentation_data() {
        assert_eq!(MoodLabel::VeryPositive.display_name(), "Very Positive");
        assert_eq!(MoodLabel::VeryNegative.emoji(), "😢");
        assert!(MoodLabel::Neutral.gradient().starts_with("linear-gradient"));
    }
}
