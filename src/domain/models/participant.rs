use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::models::field::{AnswerMap, AnswerValue};
use crate::domain::services::catalog::{KEY_EMAIL, KEY_NAME, KEY_PHONE};

pub const PARTICIPANT_STATUSES: [&str; 4] = ["registered", "matched", "withdrawn", "waitlisted"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Participant {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub age: i32,
    pub answers: Json<AnswerMap>,
    pub status: String, // registered, matched, withdrawn, waitlisted
    pub created_at: DateTime<Utc>,
}

pub struct NewParticipantParams {
    pub event_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub age: i32,
    pub answers: AnswerMap,
}

impl Participant {
    pub fn new(params: NewParticipantParams) -> Self {
        let mut participant = Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            name: String::new(),
            email: String::new(),
            phone_number: None,
            age: params.age,
            answers: Json(params.answers),
            status: "registered".to_string(),
            created_at: Utc::now(),
        };
        participant.set_name(params.name);
        participant.set_email(params.email);
        participant.set_phone_number(params.phone_number);
        participant
    }

    // The contact columns and their answers must never disagree.

    pub fn set_name(&mut self, name: String) {
        self.answers.0.insert(KEY_NAME.to_string(), AnswerValue::Text(name.clone()));
        self.name = name;
    }

    pub fn set_email(&mut self, email: String) {
        self.answers.0.insert(KEY_EMAIL.to_string(), AnswerValue::Text(email.clone()));
        self.email = email;
    }

    pub fn set_phone_number(&mut self, phone: Option<String>) {
        match &phone {
            Some(p) => self.answers.0.insert(KEY_PHONE.to_string(), AnswerValue::Text(p.clone())),
            None => self.answers.0.remove(KEY_PHONE),
        };
        self.phone_number = phone;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant() -> Participant {
        let answers: AnswerMap = [
            ("email".to_string(), AnswerValue::Text("Ana@Example.com".into())),
            ("gender".to_string(), AnswerValue::Text("Female".into())),
        ].into();

        Participant::new(NewParticipantParams {
            event_id: "ev".into(),
            name: "Ana Ruiz".into(),
            email: "ana@example.com".into(),
            phone_number: None,
            age: 30,
            answers,
        })
    }

    #[test]
    fn contact_edits_are_mirrored_into_answers() {
        let mut p = participant();
        assert_eq!(p.answers.0["email"], AnswerValue::Text("ana@example.com".into()));
        assert_eq!(p.answers.0["name"], AnswerValue::Text("Ana Ruiz".into()));

        p.set_phone_number(Some("+1 555 000 1111".into()));
        p.set_name("Ana R.".into());
        assert_eq!(p.answers.0["phone"], AnswerValue::Text("+1 555 000 1111".into()));
        assert_eq!(p.answers.0["name"], AnswerValue::Text("Ana R.".into()));

        p.set_phone_number(None);
        assert!(!p.answers.0.contains_key("phone"));
        assert_eq!(p.answers.0["gender"], AnswerValue::Text("Female".into()));
    }
}
