//! 条目排序与心情趋势

use crate::models::{JournalEntry, MoodDataPoint};

/// 按日期降序排序（最新在前），同日条目保持输入顺序
///
/// 日期按字符串比较，ISO 格式下与日历顺序一致。
pub fn sort_by_date_desc(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
}

/// 返回按日期降序排序后的副本
pub fn sorted_by_date_desc(entries: &[JournalEntry]) -> Vec<JournalEntry> {
    let mut sorted = entries.to_vec();
    sort_by_date_desc(&mut sorted);
    sorted
}

/// 最新条目，与降序排序后的首个条目一致
pub fn latest_entry(entries: &[JournalEntry]) -> Option<&JournalEntry> {
    entries.iter().fold(None, |latest: Option<&JournalEntry>, entry| match latest {
        Some(current) if current.entry_date >= entry.entry_date => Some(current),
        _ => Some(entry),
    })
}

/// 心情趋势：按日期升序排列
pub fn mood_trend(mut points: Vec<MoodDataPoint>) -> Vec<MoodDataPoint> {
    points.retain(|p| p.mood_score.is_finite());
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}

/// 从条目构建心情趋势，跳过尚无分数的条目
pub fn mood_trend_from_entries(entries: &[JournalEntry]) -> Vec<MoodDataPoint> {
    let points = entries
        .iter()
        .filter_map(|e| e.mood_score.map(|score| MoodDataPoint::new(e.entry_date.clone(), score)))
        .collect();
    mood_trend(points)
}
