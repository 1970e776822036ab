//! 关注点频次

use serde::Serialize;
use std::collections::HashMap;

use crate::insights::capitalize_first;
use crate::models::JournalEntry;

/// 单个关注点的出现次数
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConcernCount {
    /// 关注点原文
    pub concern: String,
    /// 展示用文本（首字母大写）
    pub display_label: String,
    /// 出现次数
    pub count: usize,
}

/// 统计关注点出现次数，按次数降序保留前 `top_n` 个
///
/// 以原文为键，区分大小写，不做归一化；空白关注点被忽略。
pub fn count_concerns(entries: &[JournalEntry], top_n: usize) -> Vec<ConcernCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    let concerns = entries
        .iter()
        .flat_map(|entry| entry.core_concerns.iter())
        .filter(|concern| !concern.trim().is_empty());

    for concern in concerns {
        let index = *slots.entry(concern.as_str()).or_insert_with(|| {
            counts.push((concern.as_str(), 0));
            counts.len() - 1
        });
        counts[index].1 += 1;
    }

    let mut ranked: Vec<ConcernCount> = counts
        .into_iter()
        .map(|(concern, count)| ConcernCount {
            concern: concern.to_string(),
            display_label: capitalize_first(concern),
            count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(top_n);
    ranked
}
