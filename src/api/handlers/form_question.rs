use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::event::CurrentEvent;
use crate::api::dtos::requests::{
    CreateQuestionRequest, UpdateQuestionRequest, ReorderQuestionsRequest, MoveQuestionRequest,
};
use crate::domain::services::question_store::{NewQuestion, QuestionPatch};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    let questions = state.question_store.list(&event.id, false).await?;
    Ok(Json(questions))
}

pub async fn list_public_questions(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
) -> Result<impl IntoResponse, AppError> {
    let questions = state.question_store.list(&event.id, true).await?;
    Ok(Json(questions))
}

pub async fn create_question(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.question_store.add(&event.id, NewQuestion {
        key: payload.question_key,
        label: payload.label,
        kind: payload.kind,
        options: payload.options,
        required: payload.is_required,
        active: payload.is_active,
    }).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_question(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, question_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let question = state.question_store.get(&event.id, &question_id).await?;
    Ok(Json(question))
}

pub async fn update_question(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, question_id)): Path<(String, String)>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.question_store.update(&event.id, &question_id, QuestionPatch {
        label: payload.label,
        kind: payload.kind,
        options: payload.options,
        required: payload.is_required,
        active: payload.is_active,
    }).await?;
    Ok(Json(updated))
}

pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, question_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.question_store.delete(&event.id, &question_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn reorder_questions(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Json(payload): Json<ReorderQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let questions = state.question_store.reorder(&event.id, &payload.question_ids).await?;
    Ok(Json(questions))
}

pub async fn move_question(
    State(state): State<Arc<AppState>>,
    CurrentEvent(event): CurrentEvent,
    Path((_, question_id)): Path<(String, String)>,
    Json(payload): Json<MoveQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Moving question {} {:?}", question_id, payload.direction);
    let questions = state.question_store.move_adjacent(&event.id, &question_id, payload.direction).await?;
    Ok(Json(questions))
}
