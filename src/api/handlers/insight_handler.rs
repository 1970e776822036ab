//! Insight API Handlers
//!
//! Aggregations over the caller's history. Empty data renders as a
//! placeholder message, never as an error.

use axum::{
    Json,
    extract::{Extension, Query, State},
    response::IntoResponse,
};

use crate::{
    api::{
        app_state::AppState,
        dto::{entry_dto::HistoryQuery, insight_dto::*},
        handlers::entry_handler::full_history,
    },
    error::AppError,
    insights::{self, Dashboard, EmotionSnapshot},
    security::Session,
};

/// GET /api/v1/insights/emotions
pub async fn emotion_averages(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = full_history(&state, &session, &query.range()?).await?;
    let averages = insights::average_emotions(snapshot.entries(), state.top_n());

    Ok(Json(EmotionAveragesResponse::from(averages)))
}

/// GET /api/v1/insights/concerns
pub async fn concern_frequency(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = full_history(&state, &session, &query.range()?).await?;
    let concerns = insights::count_concerns(snapshot.entries(), state.top_n());

    Ok(Json(ConcernFrequencyResponse::from(concerns)))
}

/// GET /api/v1/insights/mood-trend
pub async fn mood_trend(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = query.range()?;
    let points = state.track(state.journal_service.mood_trend(&session, &range).await)?;

    Ok(Json(MoodTrendResponse::from(points)))
}

/// GET /api/v1/insights/snapshot
pub async fn emotion_snapshot(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = full_history(&state, &session, &query.range()?).await?;

    Ok(Json(SnapshotResponse::from(EmotionSnapshot::from_entry(
        snapshot.latest(),
    ))))
}

/// GET /api/v1/insights/reflection
pub async fn daily_reflection(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = full_history(&state, &session, &Default::default()).await?;

    let reflection = state
        .reflection_service
        .reflect(&session, snapshot.latest())
        .await?;
    if reflection.generated || reflection.error.is_some() {
        state.metrics.record_reflection(reflection.generated);
    }

    Ok(Json(reflection))
}

/// GET /api/v1/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = query.range()?;

    let (snapshot, trend) = tokio::join!(
        full_history(&state, &session, &range),
        state.journal_service.mood_trend(&session, &range),
    );
    let snapshot = snapshot?;
    let trend = state.track(trend)?;

    let dashboard = Dashboard::build(snapshot.entries(), state.top_n());

    Ok(Json(DashboardResponse::new(dashboard, trend)))
}
