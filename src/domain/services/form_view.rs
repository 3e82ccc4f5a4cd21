use std::sync::Arc;

use crate::domain::models::event::Event;
use crate::domain::models::field::FieldSpec;
use crate::domain::models::form_question::FormQuestion;
use crate::domain::ports::{EventRepository, FormQuestionRepository};
use crate::domain::services::catalog;
use crate::domain::services::form_config::EventFormConfig;
use crate::error::AppError;

pub fn merge_fields(standard: Vec<FieldSpec>, questions: &[FormQuestion]) -> Result<Vec<FieldSpec>, AppError> {
    let mut custom = questions.iter()
        .map(FormQuestion::to_field_spec)
        .collect::<Result<Vec<_>, _>>()?;
    custom.sort_by_key(|f| f.order);

    let mut fields = standard;
    fields.extend(custom);
    Ok(fields)
}

pub fn builder_fields(config: &EventFormConfig, questions: &[FormQuestion]) -> Result<Vec<FieldSpec>, AppError> {
    let standard = catalog::all_fields()
        .into_iter()
        .map(|mut f| {
            f.active = !config.is_disabled(&f.key);
            f
        })
        .collect();
    merge_fields(standard, questions)
}

pub fn public_fields(config: &EventFormConfig, questions: &[FormQuestion]) -> Result<Vec<FieldSpec>, AppError> {
    let active: Vec<FormQuestion> = questions.iter().filter(|q| q.is_active).cloned().collect();
    merge_fields(config.effective_standard_fields(), &active)
}

/// Reads an event's standard-field overrides and custom questions together.
pub struct FormView {
    event_repo: Arc<dyn EventRepository>,
    question_repo: Arc<dyn FormQuestionRepository>,
}

impl FormView {
    pub fn new(event_repo: Arc<dyn EventRepository>, question_repo: Arc<dyn FormQuestionRepository>) -> Self {
        Self { event_repo, question_repo }
    }

    pub async fn event(&self, event_id: &str) -> Result<Event, AppError> {
        self.event_repo.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))
    }

    pub async fn builder_fields(&self, event: &Event) -> Result<Vec<FieldSpec>, AppError> {
        let questions = self.question_repo.list_by_event(&event.id, false).await?;
        builder_fields(&EventFormConfig::from_event(event), &questions)
    }

    pub async fn public_fields(&self, event: &Event) -> Result<Vec<FieldSpec>, AppError> {
        let questions = self.question_repo.list_by_event(&event.id, true).await?;
        public_fields(&EventFormConfig::from_event(event), &questions)
    }
}
