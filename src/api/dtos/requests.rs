use crate::domain::models::event::EventSettings;
use crate::domain::models::field::{AnswerMap, FieldKind};
use crate::domain::services::question_store::Direction;
use chrono::NaiveDate;
use serde::Deserialize;

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub status: Option<String>,
    #[serde(default)]
    pub settings: EventSettings,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateQuestionRequest {
    pub question_key: Option<String>,
    #[serde(default)]
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_true")]
    pub is_required: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct UpdateQuestionRequest {
    pub label: Option<String>,
    pub kind: Option<FieldKind>,
    pub options: Option<Vec<String>>,
    pub is_required: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ReorderQuestionsRequest {
    pub question_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct MoveQuestionRequest {
    pub direction: Direction,
}

#[derive(Deserialize)]
pub struct RegisterParticipantRequest {
    pub answers: AnswerMap,
}

#[derive(Deserialize)]
pub struct UpdateParticipantRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub address: Option<String>,
    pub total_capacity: i32,
    pub min_age: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub total_capacity: Option<i32>,
    pub min_age: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateMatchRequest {
    pub participant1_id: String,
    pub participant2_id: String,
    pub venue_id: Option<String>,
    pub compatibility_score: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateMatchRequest {
    pub venue_id: Option<String>,
    pub compatibility_score: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}
