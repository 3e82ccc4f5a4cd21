use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::event::CurrentEvent;
use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::domain::models::event::{is_valid_status, Event, EventSettings, EventSummary, PublicEvent};
use crate::domain::services::form_config::validate_disabled_keys;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn check_status(status: &str) -> Result<(), AppError> {
    if is_valid_status(status) {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Invalid event status '{}'", status)))
    }
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Event name is required".into()));
    }

    let disabled = validate_disabled_keys(&payload.settings.disabled_standard_fields)?;
    let settings = EventSettings { disabled_standard_fields: disabled.into_iter().collect() };

    let mut event = Event::new(name, payload.description, payload.event_date, settings);
    if let Some(status) = payload.status {
        check_status(&status)?;
        event.status = status;
    }

    let created = state.event_repo.create(&event).await?;
    info!("Created event: {} ({})", created.name, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;

    let mut summaries = Vec::with_capacity(events.len());
    for event in events {
        let participant_count = state.participant_repo.count_by_event(&event.id).await?;
        let match_count = state.match_repo.count_by_event(&event.id).await?;
        summaries.push(EventSummary { event, participant_count, match_count });
    }

    Ok(Json(summaries))
}

pub async fn get_event(
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(event))
}

pub async fn get_public_event(
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(PublicEvent::from(&event)))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    CurrentEvent(mut event): CurrentEvent,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Event name is required".into()));
        }
        event.name = name;
    }
    if let Some(status) = payload.status {
        check_status(&status)?;
        event.status = status;
    }
    if payload.description.is_some() { event.description = payload.description; }
    if let Some(date) = payload.event_date { event.event_date = date; }

    let updated = state.event_repo.update(&event).await?;
    info!("Updated event: {} (status {})", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&event.id).await?;
    info!("Deleted event: {}", event.id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
