use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// 情绪强度表
///
/// 保留上游 JSON 中标签出现的顺序，聚合时的“出现顺序”以此为准。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionMap(Vec<(String, f64)>);

impl EmotionMap {
    /// 创建空表
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// 写入标签强度，重复标签覆盖原值但保持原位置
    pub fn insert(&mut self, label: impl Into<String>, intensity: f64) {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(slot) => slot.1 = intensity,
            None => self.0.push((label, intensity)),
        }
    }

    /// 获取标签强度
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 从任意 JSON 值宽松解析
    ///
    /// 接受对象或对象的 JSON 字符串形式；非数值项被丢弃，其余情况视为空表。
    pub fn from_value(value: Value) -> Self {
        let object = match value {
            Value::Object(map) => map,
            Value::String(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                _ => return Self::new(),
            },
            _ => return Self::new(),
        };

        let mut emotions = Self::new();
        for (label, score) in object {
            if let Some(score) = score.as_f64().filter(|s| s.is_finite()) {
                emotions.insert(label, score);
            }
        }
        emotions
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for EmotionMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut emotions = Self::new();
        for (label, score) in iter {
            emotions.insert(label, score);
        }
        emotions
    }
}

impl Serialize for EmotionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, score) in &self.0 {
            map.serialize_entry(label, score)?;
        }
        map.end()
    }
}

/// 日记条目
///
/// 由上游日记服务提供，网关侧只读。分析字段在分析失败或尚未完成时为空。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "JournalEntryWire", rename_all = "camelCase")]
pub struct JournalEntry {
    /// 条目唯一标识
    pub id: String,

    /// 条目日期（ISO 格式字符串，用作排序键）
    pub entry_date: String,

    /// 原始文本
    pub raw_text: String,

    /// 心情分数，取值 [-1, 1]
    pub mood_score: Option<f64>,

    /// 情绪强度表
    pub emotions: EmotionMap,

    /// 核心关注点
    pub core_concerns: Vec<String>,

    /// 成长建议
    pub growth_tips: Vec<String>,

    /// AI 摘要
    pub summary: Option<String>,
}

impl JournalEntry {
    /// 创建未分析的条目
    pub fn new(id: impl Into<String>, entry_date: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entry_date: entry_date.into(),
            raw_text: raw_text.into(),
            mood_score: None,
            emotions: EmotionMap::new(),
            core_concerns: Vec::new(),
            growth_tips: Vec::new(),
            summary: None,
        }
    }

    pub fn with_mood_score(mut self, score: f64) -> Self {
        self.mood_score = Some(score);
        self
    }

    pub fn with_emotions<S: Into<String>>(mut self, emotions: impl IntoIterator<Item = (S, f64)>) -> Self {
        self.emotions = emotions.into_iter().collect();
        self
    }

    pub fn with_concerns<S: Into<String>>(mut self, concerns: impl IntoIterator<Item = S>) -> Self {
        self.core_concerns = concerns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_growth_tips<S: Into<String>>(mut self, tips: impl IntoIterator<Item = S>) -> Self {
        self.growth_tips = tips.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// 是否已有分析结果
    pub fn is_analyzed(&self) -> bool {
        self.mood_score.is_some() || !self.emotions.is_empty()
    }
}

/// 上游线格式
///
/// 分析字段可能缺失、为 null，或以 JSON 字符串形式出现。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JournalEntryWire {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    entry_date: Option<String>,
    #[serde(default)]
    raw_text: Option<String>,
    #[serde(default)]
    mood_score: Option<f64>,
    #[serde(default)]
    emotions: Value,
    #[serde(default)]
    core_concerns: Value,
    #[serde(default)]
    growth_tips: Value,
    #[serde(default)]
    summary: Option<String>,
}

impl From<JournalEntryWire> for JournalEntry {
    fn from(wire: JournalEntryWire) -> Self {
        let id = match wire.id {
            Value::String(id) => id,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        Self {
            id,
            entry_date: wire.entry_date.unwrap_or_default(),
            raw_text: wire.raw_text.unwrap_or_default(),
            mood_score: wire.mood_score.filter(|s| s.is_finite()),
            emotions: EmotionMap::from_value(wire.emotions),
            core_concerns: lenient_strings(wire.core_concerns),
            growth_tips: lenient_strings(wire.growth_tips),
            summary: wire.summary,
        }
    }
}

/// 宽松解析字符串数组：接受数组或数组的 JSON 字符串形式，丢弃非字符串成员
fn lenient_strings(value: Value) -> Vec<String> {
    let items = match value {
        Value::Array(items) => items,
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

/// 心情趋势数据点（上游 mood-data 接口）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodDataPoint {
    /// 日期
    pub date: String,
    /// 心情分数
    pub mood_score: f64,
}

impl MoodDataPoint {
    pub fn new(date: impl Into<String>, mood_score: f64) -> Self {
        Self {
            date: date.into(),
            mood_score,
        }
    }
}
