//! 最新条目的情绪构成

use serde::Serialize;
use std::cmp::Ordering;

use crate::insights::palette::emotion_color;
use crate::models::JournalEntry;

/// 情绪构成中的一项
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmotionSlice {
    pub label: String,
    pub intensity: f64,
    pub color: &'static str,
}

/// 单个条目的情绪构成
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionSnapshot {
    /// 条目标识
    pub entry_id: String,
    /// 条目日期
    pub entry_date: String,
    /// 按强度降序排列的情绪
    pub slices: Vec<EmotionSlice>,
}

impl EmotionSnapshot {
    /// 由条目构建；没有条目或情绪为空时返回 None
    pub fn from_entry(entry: Option<&JournalEntry>) -> Option<Self> {
        let entry = entry.filter(|e| !e.emotions.is_empty())?;

        let mut slices: Vec<EmotionSlice> = entry
            .emotions
            .iter()
            .map(|(label, intensity)| EmotionSlice {
                label: label.to_string(),
                intensity,
                color: emotion_color(label),
            })
            .collect();
        slices.sort_by(|a, b| b.intensity.partial_cmp(&a.intensity).unwrap_or(Ordering::Equal));

        Some(Self {
            entry_id: entry.id.clone(),
            entry_date: entry.entry_date.clone(),
            slices,
        })
    }

    /// 以 `label (xx.x%)` 形式拼接，供摘要与提示词使用
    pub fn describe(&self) -> String {
        self.slices
            .iter()
            .map(|s| format!("{} ({:.1}%)", s.label, s.intensity * 100.0))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
