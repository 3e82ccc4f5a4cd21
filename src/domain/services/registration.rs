use std::sync::Arc;
use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::domain::models::field::{AnswerMap, AnswerValue, FieldSpec};
use crate::domain::models::participant::{NewParticipantParams, Participant};
use crate::domain::ports::ParticipantRepository;
use crate::domain::services::catalog::{KEY_DATE_OF_BIRTH, KEY_EMAIL, KEY_NAME, KEY_PHONE};
use crate::domain::services::form_view::FormView;
use crate::domain::services::renderer::{self, FormSession};
use crate::error::AppError;

pub const MIN_PARTICIPANT_AGE: i32 = 18;

/// Whole years between `dob` and `today`; the birthday itself counts.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub answers: AnswerMap,
    pub age: i32,
}

impl ValidatedSubmission {
    fn text(&self, key: &str) -> Option<String> {
        self.answers.get(key)
            .and_then(AnswerValue::as_text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Required answers first (first miss in field order wins), then per-kind
/// shape checks, then the age gate.
pub fn validate_submission(fields: &[FieldSpec], answers: AnswerMap, today: NaiveDate) -> Result<ValidatedSubmission, AppError> {
    let answered = |f: &FieldSpec| answers.get(&f.key).is_some_and(|v| !v.is_empty());

    if let Some(missing) = fields.iter().find(|f| f.required && !answered(f)) {
        return Err(AppError::Validation(format!("Please answer: {}", missing.label)));
    }

    for field in fields {
        if let Some(value) = answers.get(&field.key).filter(|v| !v.is_empty()) {
            renderer::validate_answer(field, value)?;
        }
    }

    let dob = answers.get(KEY_DATE_OF_BIRTH)
        .and_then(AnswerValue::as_text)
        .and_then(renderer::parse_date)
        .ok_or_else(|| AppError::Validation("date of birth is required".into()))?;

    let age = calculate_age(dob, today);
    if age < MIN_PARTICIPANT_AGE {
        return Err(AppError::Validation("must be 18 or older".into()));
    }

    Ok(ValidatedSubmission { answers, age })
}

pub struct RegistrationService {
    form_view: Arc<FormView>,
    participant_repo: Arc<dyn ParticipantRepository>,
}

impl RegistrationService {
    pub fn new(form_view: Arc<FormView>, participant_repo: Arc<dyn ParticipantRepository>) -> Self {
        Self { form_view, participant_repo }
    }

    pub async fn register(&self, event_id: &str, submitted: AnswerMap, today: NaiveDate) -> Result<Participant, AppError> {
        let event = self.form_view.event(event_id).await?;
        if !event.is_registration_open() {
            warn!("Rejected registration for event {} in status {}", event_id, event.status);
            return Err(AppError::Validation("Registration is not open for this event".into()));
        }

        let fields = self.form_view.public_fields(&event).await?;
        let mut session = FormSession::new(fields);
        session.fill(submitted);
        let submission = session.submit(today)?;

        let name = submission.text(KEY_NAME).unwrap_or_default();
        let email = submission.text(KEY_EMAIL).unwrap_or_default().to_lowercase();

        if self.participant_repo.email_exists(event_id, &email).await? {
            return Err(AppError::Conflict("This email is already registered for this event".into()));
        }

        let participant = Participant::new(NewParticipantParams {
            event_id: event_id.to_string(),
            name,
            email,
            phone_number: submission.text(KEY_PHONE),
            age: submission.age,
            answers: submission.answers,
        });

        let created = self.participant_repo.create(&participant).await?;
        info!("Registered participant {} for event {}", created.id, event_id);
        Ok(created)
    }
}
