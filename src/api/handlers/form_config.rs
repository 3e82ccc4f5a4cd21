use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::event::CurrentEvent;
use crate::api::dtos::responses::{FormConfigResponse, ToggleFieldResponse, RenderedFormResponse, PublicFormResponse};
use crate::domain::models::event::PublicEvent;
use crate::domain::services::form_config::EventFormConfig;
use crate::domain::services::renderer::{render_fields, RenderMode};
use crate::domain::services::form_view;
use crate::error::AppError;
use std::sync::Arc;

fn config_response(config: &EventFormConfig) -> Result<FormConfigResponse, AppError> {
    Ok(FormConfigResponse {
        event_id: config.event_id.clone(),
        disabled_standard_fields: config.disabled_standard_keys.iter().cloned().collect(),
        standard_fields: form_view::builder_fields(config, &[])?,
    })
}

pub async fn get_form_config(
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(config_response(&EventFormConfig::from_event(&event))?))
}

pub async fn toggle_standard_field(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, key)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let mut config = EventFormConfig::from_event(&event);
    let disabled = state.form_config_service.toggle_standard_field(&mut config, &key).await?;

    Ok(Json(ToggleFieldResponse {
        key,
        disabled,
        disabled_standard_fields: config.disabled_standard_keys.into_iter().collect(),
    }))
}

pub async fn builder_form(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    let fields = state.form_view.builder_fields(&event).await?;
    Ok(Json(RenderedFormResponse {
        event_id: event.id,
        mode: "builder",
        fields: render_fields(&fields, None, RenderMode::Builder),
    }))
}

pub async fn preview_form(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    let fields = state.form_view.builder_fields(&event).await?;
    Ok(Json(RenderedFormResponse {
        event_id: event.id,
        mode: "preview",
        fields: render_fields(&fields, None, RenderMode::Preview),
    }))
}

pub async fn public_form(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    let fields = state.form_view.public_fields(&event).await?;
    Ok(Json(PublicFormResponse {
        event: PublicEvent::from(&event),
        fields: render_fields(&fields, None, RenderMode::Preview),
    }))
}
