use crate::domain::models::event::PublicEvent;
use crate::domain::models::field::FieldSpec;
use crate::domain::services::renderer::RenderedField;
use serde::Serialize;

#[derive(Serialize)]
pub struct FormConfigResponse {
    pub event_id: String,
    pub disabled_standard_fields: Vec<String>,
    pub standard_fields: Vec<FieldSpec>,
}

#[derive(Serialize)]
pub struct ToggleFieldResponse {
    pub key: String,
    pub disabled: bool,
    pub disabled_standard_fields: Vec<String>,
}

#[derive(Serialize)]
pub struct RenderedFormResponse {
    pub event_id: String,
    pub mode: &'static str,
    pub fields: Vec<RenderedField>,
}

#[derive(Serialize)]
pub struct PublicFormResponse {
    pub event: PublicEvent,
    pub fields: Vec<RenderedField>,
}
