//! 心情分档

use serde::{Serialize, Serializer};
use std::fmt;

/// 心情档位
///
/// 阈值：`> 0.5` 非常积极，`(0.1, 0.5]` 积极，`[-0.1, 0.1]` 平静，
/// `[-0.5, -0.1)` 消极，`< -0.5` 非常消极；无分数为 N/A。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodBand {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
    /// 尚无分数
    Unknown,
}

impl MoodBand {
    /// 根据分数分档
    pub fn classify(score: Option<f64>) -> Self {
        match score {
            None => MoodBand::Unknown,
            Some(s) if s.is_nan() => MoodBand::Unknown,
            Some(s) if s > 0.5 => MoodBand::VeryPositive,
            Some(s) if s > 0.1 => MoodBand::Positive,
            Some(s) if s < -0.5 => MoodBand::VeryNegative,
            Some(s) if s < -0.1 => MoodBand::Negative,
            Some(_) => MoodBand::Neutral,
        }
    }

    /// 展示文本
    pub fn label(self) -> &'static str {
        match self {
            MoodBand::VeryPositive => "Very Positive",
            MoodBand::Positive => "Positive",
            MoodBand::Neutral => "Neutral",
            MoodBand::Negative => "Negative",
            MoodBand::VeryNegative => "Very Negative",
            MoodBand::Unknown => "N/A",
        }
    }

    /// 展示颜色
    pub fn color(self) -> &'static str {
        match self {
            MoodBand::VeryPositive => "#22C55E",
            MoodBand::Positive => "#84CC16",
            MoodBand::Neutral | MoodBand::Unknown => "#6B7280",
            MoodBand::Negative => "#F97316",
            MoodBand::VeryNegative => "#EF4444",
        }
    }
}

impl fmt::Display for MoodBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for MoodBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 分数对应的展示文本
pub fn mood_label(score: Option<f64>) -> &'static str {
    MoodBand::classify(score).label()
}

/// 分数对应的展示颜色
pub fn mood_color(score: Option<f64>) -> &'static str {
    MoodBand::classify(score).color()
}
