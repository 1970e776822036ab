//! 洞察计算模块
//!
//! 对日记条目做纯数据聚合：情绪均值、关注点频次、心情分档、日期排序，
//! 以及基于这些结果的仪表盘汇总。所有函数对空输入返回空结果。

pub mod concerns;
pub mod dashboard;
pub mod emotions;
pub mod mood;
pub mod ordering;
pub mod palette;
pub mod prompt;
pub mod snapshot;

pub use concerns::{ConcernCount, count_concerns};
pub use dashboard::{Dashboard, HistoryItem, history};
pub use emotions::{EmotionAverage, average_emotions};
pub use mood::{MoodBand, mood_color, mood_label};
pub use ordering::{latest_entry, mood_trend, mood_trend_from_entries, sort_by_date_desc, sorted_by_date_desc};
pub use palette::emotion_color;
pub use prompt::reflection_prompt;
pub use snapshot::{EmotionSlice, EmotionSnapshot};

/// 排行默认保留条目数
pub const DEFAULT_TOP_N: usize = 7;

/// 首字母大写
pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
