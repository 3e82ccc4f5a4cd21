use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::event::CurrentEvent;
use crate::api::dtos::requests::{CreateVenueRequest, UpdateVenueRequest};
use crate::domain::models::venue::Venue;
use crate::domain::services::registration::MIN_PARTICIPANT_AGE;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn check_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity < 1 {
        return Err(AppError::Validation("total_capacity must be at least 1".into()));
    }
    Ok(())
}

fn check_min_age(min_age: i32) -> Result<(), AppError> {
    if min_age < MIN_PARTICIPANT_AGE {
        return Err(AppError::Validation(format!("min_age cannot be below {}", MIN_PARTICIPANT_AGE)));
    }
    Ok(())
}

pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Json(payload): Json<CreateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Venue name is required".into()));
    }
    check_capacity(payload.total_capacity)?;
    let min_age = payload.min_age.unwrap_or(MIN_PARTICIPANT_AGE);
    check_min_age(min_age)?;

    let venue = Venue::new(event.id, name, payload.address, payload.total_capacity, min_age);
    let created = state.venue_repo.create(&venue).await?;
    info!("Created venue {} with {} slots", created.name, created.total_capacity);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    let venues = state.venue_repo.list_by_event(&event.id).await?;
    Ok(Json(venues))
}

pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, venue_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let venue = state.venue_repo.find_by_id(&event.id, &venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;
    Ok(Json(venue))
}

pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, venue_id)): Path<(String, String)>,
    Json(payload): Json<UpdateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut venue = state.venue_repo.find_by_id(&event.id, &venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Venue name is required".into()));
        }
        venue.name = name;
    }
    if payload.address.is_some() { venue.address = payload.address; }
    if let Some(capacity) = payload.total_capacity {
        check_capacity(capacity)?;
        venue.total_capacity = capacity;
    }
    if let Some(min_age) = payload.min_age {
        check_min_age(min_age)?;
        venue.min_age = min_age;
    }
    if let Some(active) = payload.is_active { venue.is_active = active; }

    let updated = state.venue_repo.update(&venue).await?;
    info!("Updated venue {}: {}/{} slots free", updated.id, updated.available_slots, updated.total_capacity);
    Ok(Json(updated))
}

/// Venues still referenced by matches are deactivated rather than removed.
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, venue_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    if state.match_repo.count_by_venue(&venue_id).await? > 0 {
        state.venue_repo.deactivate(&event.id, &venue_id).await?;
        info!("Venue {} has matches; deactivated instead of deleting", venue_id);
        return Ok(Json(serde_json::json!({"status": "deactivated"})));
    }

    state.venue_repo.delete(&event.id, &venue_id).await?;
    info!("Deleted venue {}", venue_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
