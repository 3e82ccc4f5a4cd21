use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;
use crate::domain::models::event::Event;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

/// The event named by the `{event_id}` path segment, loaded up front.
pub struct CurrentEvent(pub Event);

impl FromRequestParts<Arc<AppState>> for CurrentEvent {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Validation("Invalid path parameters".into()))?;

        let event_id = params.get("event_id")
            .ok_or(AppError::Validation("Missing event id".into()))?;

        state.event_repo.find_by_id(event_id).await?
            .map(CurrentEvent)
            .ok_or(AppError::NotFound("Event not found".into()))
    }
}
