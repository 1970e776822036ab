//! Insight Routes

use axum::{Router, routing::get};

use crate::api::app_state::AppState;
use crate::api::handlers::insight_handler::*;

/// 创建洞察路由器
pub fn create_insight_router() -> Router<AppState> {
    Router::new()
        .route("/insights/emotions", get(emotion_averages))
        .route("/insights/concerns", get(concern_frequency))
        .route("/insights/mood-trend", get(mood_trend))
        .route("/insights/snapshot", get(emotion_snapshot))
        .route("/insights/reflection", get(daily_reflection))
        .route("/dashboard", get(dashboard))
}
