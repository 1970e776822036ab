//! 仪表盘汇总

use serde::Serialize;

use crate::insights::concerns::{ConcernCount, count_concerns};
use crate::insights::emotions::{EmotionAverage, average_emotions};
use crate::insights::mood::MoodBand;
use crate::insights::ordering::sorted_by_date_desc;
use crate::insights::snapshot::EmotionSnapshot;
use crate::models::JournalEntry;

/// 历史列表中的条目，附带心情档位
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[serde(flatten)]
    pub entry: JournalEntry,
    pub mood_label: &'static str,
    pub mood_color: &'static str,
}

impl From<JournalEntry> for HistoryItem {
    fn from(entry: JournalEntry) -> Self {
        let band = MoodBand::classify(entry.mood_score);
        Self {
            entry,
            mood_label: band.label(),
            mood_color: band.color(),
        }
    }
}

/// 按日期降序构建历史列表
pub fn history(entries: &[JournalEntry]) -> Vec<HistoryItem> {
    sorted_by_date_desc(entries)
        .into_iter()
        .map(HistoryItem::from)
        .collect()
}

/// 仪表盘数据
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// 历史条目（最新在前）
    pub history: Vec<HistoryItem>,
    /// 情绪均值排行
    pub average_emotions: Vec<EmotionAverage>,
    /// 关注点频次排行
    pub concern_frequency: Vec<ConcernCount>,
    /// 最新条目的情绪构成
    pub snapshot: Option<EmotionSnapshot>,
}

impl Dashboard {
    pub fn build(entries: &[JournalEntry], top_n: usize) -> Self {
        let history = history(entries);
        let snapshot = EmotionSnapshot::from_entry(history.first().map(|item| &item.entry));

        Self {
            average_emotions: average_emotions(entries, top_n),
            concern_frequency: count_concerns(entries, top_n),
            snapshot,
            history,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Dashboard::build(&[], 7);
        assert!(dashboard.is_empty());
        assert!(dashboard.average_emotions.is_empty());
        assert!(dashboard.concern_frequency.is_empty());
        assert!(dashboard.snapshot.is_none());
    }

    #[test]
    fn test_dashboard_uses_latest_entry_for_snapshot() {
        let entries = vec![
            JournalEntry::new("old", "2024-01-01", "a").with_emotions([("sadness", 0.9)]),
            JournalEntry::new("new", "2024-01-05", "b")
                .with_mood_score(0.7)
                .with_emotions([("joy", 0.6)])
                .with_concerns(["work"]),
        ];
        let dashboard = Dashboard::build(&entries, 7);

        assert_eq!(dashboard.history[0].entry.id, "new");
        assert_eq!(dashboard.history[0].mood_label, "Very Positive");
        assert_eq!(dashboard.history[1].mood_label, "N/A");
        assert_eq!(dashboard.snapshot.as_ref().unwrap().entry_id, "new");
        assert_eq!(dashboard.average_emotions[0].label, "sadness");
        assert_eq!(dashboard.concern_frequency[0].count, 1);
    }

    #[test]
    fn test_history_item_serializes_flat() {
        let item = HistoryItem::from(JournalEntry::new("id1", "2024-01-01", "x").with_mood_score(-0.2));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "id1");
        assert_eq!(value["entryDate"], "2024-01-01");
        assert_eq!(value["moodLabel"], "Negative");
    }
}
