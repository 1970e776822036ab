//! Entry API Handlers
//!
//! HTTP handlers for journal entry CRUD. Every mutation answers with the
//! refreshed history so the caller can replace its list wholesale.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::entry_dto::*},
    client::DateRange,
    error::AppError,
    insights::HistoryItem,
    security::Session,
};

/// List entries, newest first
///
/// GET /api/v1/entries
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = query.range()?;
    debug!("Listing entries for {:?}", session.username());

    let snapshot = state.track(state.journal_service.snapshot(&session, &range).await)?;

    Ok(Json(HistoryResponse::from(&snapshot)))
}

/// Submit a new entry
///
/// POST /api/v1/entries
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<EntryTextRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (entry, snapshot) = state.track(state.journal_service.submit(&session, &request.text).await)?;

    let response = SubmitEntryResponse {
        entry: HistoryItem::from(entry),
        history: HistoryResponse::from(&snapshot),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Get an entry by ID
///
/// GET /api/v1/entries/:id
pub async fn get_entry(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state.track(state.journal_service.entry(&session, &id).await)?;

    Ok(Json(HistoryItem::from(entry)))
}

/// Replace an entry's text
///
/// PUT /api/v1/entries/:id
pub async fn update_entry(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<EntryTextRequest>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.track(state.journal_service.edit(&session, &id, &request.text).await)?;

    Ok(Json(HistoryResponse::from(&snapshot)))
}

/// Delete an entry
///
/// DELETE /api/v1/entries/:id
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.track(state.journal_service.remove(&session, &id).await)?;
    debug!("Entry {} deleted, {} remaining", id, snapshot.len());

    Ok(Json(HistoryResponse::from(&snapshot)))
}

/// Full history, used by the insight handlers
pub(crate) async fn full_history(
    state: &AppState,
    session: &Session,
    range: &DateRange,
) -> Result<crate::services::EntrySnapshot, AppError> {
    state.track(state.journal_service.snapshot(session, range).await)
}
