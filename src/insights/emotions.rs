//! 情绪均值

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::insights::capitalize_first;
use crate::insights::palette::emotion_color;
use crate::models::JournalEntry;

/// 单个情绪标签的平均强度
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAverage {
    /// 原始标签
    pub label: String,
    /// 展示用标签（首字母大写）
    pub display_label: String,
    /// 平均强度
    pub average: f64,
    /// 参与平均的条目数
    pub samples: usize,
    /// 展示颜色
    pub color: &'static str,
}

/// 计算各情绪标签的平均强度，按均值降序保留前 `top_n` 个
///
/// 没有情绪数据的条目不参与计算；均值相同的标签保持首次出现的顺序。
pub fn average_emotions(entries: &[JournalEntry], top_n: usize) -> Vec<EmotionAverage> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64, usize)> = Vec::new();

    for entry in entries.iter().filter(|e| !e.emotions.is_empty()) {
        for (label, intensity) in entry.emotions.iter() {
            let index = *slots.entry(label).or_insert_with(|| {
                totals.push((label, 0.0, 0));
                totals.len() - 1
            });
            totals[index].1 += intensity;
            totals[index].2 += 1;
        }
    }

    let mut averages: Vec<EmotionAverage> = totals
        .into_iter()
        .map(|(label, sum, count)| EmotionAverage {
            label: label.to_string(),
            display_label: capitalize_first(label),
            average: sum / count as f64,
            samples: count,
            color: emotion_color(label),
        })
        .collect();

    // sort_by 是稳定排序
    averages.sort_by(|a, b| b.average.partial_cmp(&a.average).unwrap_or(Ordering::Equal));
    averages.truncate(top_n);
    averages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(emotions: &[(&str, f64)]) -> JournalEntry {
        JournalEntry::new("id", "2024-01-01", "text").with_emotions(emotions.iter().copied())
    }

    #[test]
    fn test_average_across_entries() {
        let entries = vec![entry(&[("joy", 0.8)]), entry(&[("joy", 0.4), ("sad", 0.2)])];
        let result = average_emotions(&entries, 7);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].label, "joy");
        assert!((result[0].average - 0.6).abs() < 1e-9);
        assert_eq!(result[0].samples, 2);
        assert_eq!(result[1].label, "sad");
        assert!((result[1].average - 0.2).abs() < 1e-9);
        assert_eq!(result[1].samples, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(average_emotions(&[], 7).is_empty());
    }

    #[test]
    fn test_entries_without_emotions_are_skipped() {
        let entries = vec![
            JournalEntry::new("a", "2024-01-01", "no analysis"),
            entry(&[("fear", 0.5)]),
        ];
        let result = average_emotions(&entries, 7);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].samples, 1);
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let entries = vec![entry(&[("surprise", 0.3), ("anger", 0.3)]), entry(&[("love", 0.3)])];
        let labels: Vec<String> = average_emotions(&entries, 7)
            .into_iter()
            .map(|a| a.label)
            .collect();
        assert_eq!(labels, vec!["surprise", "anger", "love"]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let emotions: Vec<(String, f64)> = (0..10)
            .map(|i| (format!("e{}", i), i as f64 / 10.0))
            .collect();
        let entries = vec![JournalEntry::new("a", "2024-01-01", "x").with_emotions(emotions)];
        let result = average_emotions(&entries, 7);

        assert_eq!(result.len(), 7);
        assert_eq!(result[0].label, "e9");
        assert!(result.windows(2).all(|w| w[0].average >= w[1].average));
    }

    #[test]
    fn test_display_fields() {
        let result = average_emotions(&[entry(&[("joy", 0.5), ("wonder", 0.1)])], 7);
        assert_eq!(result[0].display_label, "Joy");
        assert_eq!(result[0].color, "#5CC8C2");
        assert_eq!(result[1].color, "#CCCCCC");
    }
}
