use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use crate::state::AppState;
use crate::api::extractors::event::CurrentEvent;
use crate::api::dtos::requests::{RegisterParticipantRequest, UpdateParticipantRequest};
use crate::domain::models::participant::PARTICIPANT_STATUSES;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn register_participant(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Json(payload): Json<RegisterParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();
    let participant = state.registration_service.register(&event.id, payload.answers, today).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    let participants = state.participant_repo.list_by_event(&event.id).await?;
    Ok(Json(participants))
}

pub async fn get_participant(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, participant_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let participant = state.participant_repo.find_by_id(&event.id, &participant_id).await?
        .ok_or(AppError::NotFound("Participant not found".into()))?;
    Ok(Json(participant))
}

pub async fn update_participant(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, participant_id)): Path<(String, String)>,
    Json(payload): Json<UpdateParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut participant = state.participant_repo.find_by_id(&event.id, &participant_id).await?
        .ok_or(AppError::NotFound("Participant not found".into()))?;

    if let Some(status) = payload.status {
        if !PARTICIPANT_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation(format!("Invalid participant status '{}'", status)));
        }
        participant.status = status;
    }
    if let Some(name) = payload.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
        participant.set_name(name);
    }
    if let Some(email) = payload.email.map(|e| e.trim().to_lowercase()).filter(|e| !e.is_empty()) {
        if email != participant.email && state.participant_repo.email_exists(&event.id, &email).await? {
            return Err(AppError::Conflict("This email is already registered for this event".into()));
        }
        participant.set_email(email);
    }
    if payload.phone_number.is_some() {
        participant.set_phone_number(payload.phone_number);
    }

    let updated = state.participant_repo.update(&participant).await?;
    info!("Updated participant {} (status {})", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn delete_participant(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, participant_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.participant_repo.delete(&event.id, &participant_id).await?;
    info!("Deleted participant {} from event {}", participant_id, event.id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
