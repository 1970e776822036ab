//! 洞察 DTO

use serde::Serialize;

use crate::insights::{ConcernCount, Dashboard, EmotionAverage, EmotionSnapshot};
use crate::models::MoodDataPoint;

pub const EMPTY_EMOTIONS_MESSAGE: &str =
    "No emotion data available yet. Journal more to see your average emotional landscape!";
pub const EMPTY_CONCERNS_MESSAGE: &str =
    "No concerns detected yet. Journal more to see your patterns!";
pub const EMPTY_SNAPSHOT_MESSAGE: &str = "Journal an entry today to see your daily emotion breakdown!";
pub const EMPTY_TREND_MESSAGE: &str = "No mood data for this period yet.";

/// 情绪均值响应
#[derive(Debug, Serialize)]
pub struct EmotionAveragesResponse {
    pub emotions: Vec<EmotionAverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<Vec<EmotionAverage>> for EmotionAveragesResponse {
    fn from(emotions: Vec<EmotionAverage>) -> Self {
        Self {
            message: emotions.is_empty().then_some(EMPTY_EMOTIONS_MESSAGE),
            emotions,
        }
    }
}

/// 关注点频次响应
#[derive(Debug, Serialize)]
pub struct ConcernFrequencyResponse {
    pub concerns: Vec<ConcernCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<Vec<ConcernCount>> for ConcernFrequencyResponse {
    fn from(concerns: Vec<ConcernCount>) -> Self {
        Self {
            message: concerns.is_empty().then_some(EMPTY_CONCERNS_MESSAGE),
            concerns,
        }
    }
}

/// 心情趋势响应
#[derive(Debug, Serialize)]
pub struct MoodTrendResponse {
    pub points: Vec<MoodDataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<Vec<MoodDataPoint>> for MoodTrendResponse {
    fn from(points: Vec<MoodDataPoint>) -> Self {
        Self {
            message: points.is_empty().then_some(EMPTY_TREND_MESSAGE),
            points,
        }
    }
}

/// 情绪构成响应
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub snapshot: Option<EmotionSnapshot>,
    /// `label (xx.x%)` 形式的文字描述
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<Option<EmotionSnapshot>> for SnapshotResponse {
    fn from(snapshot: Option<EmotionSnapshot>) -> Self {
        match snapshot {
            Some(snapshot) => Self {
                description: Some(snapshot.describe()),
                snapshot: Some(snapshot),
                message: None,
            },
            None => Self {
                snapshot: None,
                description: None,
                message: Some(EMPTY_SNAPSHOT_MESSAGE),
            },
        }
    }
}

/// 仪表盘响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub dashboard: Dashboard,
    pub mood_trend: Vec<MoodDataPoint>,
    /// 各区块的空状态提示
    pub messages: DashboardMessages,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMessages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotions: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concerns: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_trend: Option<&'static str>,
}

impl DashboardResponse {
    pub fn new(dashboard: Dashboard, mood_trend: Vec<MoodDataPoint>) -> Self {
        let messages = DashboardMessages {
            history: dashboard
                .is_empty()
                .then_some(super::entry_dto::EMPTY_HISTORY_MESSAGE),
            emotions: dashboard
                .average_emotions
                .is_empty()
                .then_some(EMPTY_EMOTIONS_MESSAGE),
            concerns: dashboard
                .concern_frequency
                .is_empty()
                .then_some(EMPTY_CONCERNS_MESSAGE),
            snapshot: dashboard.snapshot.is_none().then_some(EMPTY_SNAPSHOT_MESSAGE),
            mood_trend: mood_trend.is_empty().then_some(EMPTY_TREND_MESSAGE),
        };

        Self {
            dashboard,
            mood_trend,
            messages,
        }
    }
}
