use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::event::CurrentEvent;
use crate::api::dtos::requests::{CreateMatchRequest, UpdateMatchRequest};
use crate::domain::services::matchmaking::{MatchDraft, MatchPatch};
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_match(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Json(payload): Json<CreateMatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.match_service.create(&event.id, MatchDraft {
        participant1_id: payload.participant1_id,
        participant2_id: payload.participant2_id,
        venue_id: payload.venue_id,
        compatibility_score: payload.compatibility_score,
        notes: payload.notes,
    }).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    let matches = state.match_repo.list_by_event(&event.id).await?;
    Ok(Json(matches))
}

pub async fn get_match(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, match_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let m = state.match_service.get(&event.id, &match_id).await?;
    Ok(Json(m))
}

pub async fn update_match(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, match_id)): Path<(String, String)>,
    Json(payload): Json<UpdateMatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.match_service.update(&event.id, &match_id, MatchPatch {
        venue_id: payload.venue_id,
        compatibility_score: payload.compatibility_score,
        status: payload.status,
        notes: payload.notes,
    }).await?;
    Ok(Json(updated))
}

pub async fn delete_match(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, match_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.match_service.delete(&event.id, &match_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
