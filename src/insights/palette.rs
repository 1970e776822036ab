//! 情绪配色表

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 未登记标签的默认颜色
pub const DEFAULT_EMOTION_COLOR: &str = "#CCCCCC";

static EMOTION_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("joy", "#5CC8C2"),
        ("sadness", "#B399D4"),
        ("anger", "#FF8A7A"),
        ("fear", "#A93226"),
        ("surprise", "#85C1E9"),
        ("neutral", "#E0E0E0"),
        ("love", "#E74C3C"),
        ("disgust", "#6C3483"),
        ("anxiety", "#F7DC6F"),
        ("optimism", "#F1C40F"),
        ("relief", "#58D68D"),
        ("caring", "#2ECC71"),
        ("curiosity", "#AF7AC5"),
        ("embarrassment", "#D35400"),
        ("pride", "#F39C12"),
        ("remorse", "#7F8C8D"),
        ("annoyance", "#E67E22"),
        ("disappointment", "#283747"),
        ("grief", "#17202A"),
    ])
});

/// 查询情绪标签颜色（不区分大小写）
pub fn emotion_color(label: &str) -> &'static str {
    EMOTION_COLORS
        .get(label.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_EMOTION_COLOR)
}
