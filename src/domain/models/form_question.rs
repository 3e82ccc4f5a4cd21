use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::models::field::{FieldKind, FieldOrigin, FieldSpec};
use crate::error::AppError;

/// Organizer-authored question as stored for one event.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FormQuestion {
    pub id: String,
    pub event_id: String,
    pub question_key: String,
    pub label: String,
    pub kind: String,
    pub options: Json<Vec<String>>,
    pub is_required: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

pub struct NewFormQuestionParams {
    pub event_id: String,
    pub question_key: String,
    pub label: String,
    pub kind: FieldKind,
    pub options: Vec<String>,
    pub is_required: bool,
    pub is_active: bool,
    pub display_order: i32,
}

impl FormQuestion {
    pub fn new(params: NewFormQuestionParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            question_key: params.question_key,
            label: params.label,
            kind: params.kind.as_str().to_string(),
            options: Json(params.options),
            is_required: params.is_required,
            is_active: params.is_active,
            display_order: params.display_order,
            created_at: Utc::now(),
        }
    }

    pub fn field_kind(&self) -> Result<FieldKind, AppError> {
        self.kind.parse::<FieldKind>().map_err(|e| {
            AppError::InternalWithMsg(format!("question {} has corrupt kind: {}", self.id, e))
        })
    }

    pub fn to_field_spec(&self) -> Result<FieldSpec, AppError> {
        Ok(FieldSpec {
            key: self.question_key.clone(),
            label: self.label.clone(),
            kind: self.field_kind()?,
            options: self.options.0.clone(),
            required: self.is_required,
            active: self.is_active,
            order: self.display_order,
            origin: FieldOrigin::Custom,
            disableable: false,
        })
    }
}
