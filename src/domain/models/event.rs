use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

pub const EVENT_STATUSES: [&str; 5] = [
    "setup",
    "registration_open",
    "matching_in_progress",
    "completed",
    "cancelled",
];

pub const STATUS_REGISTRATION_OPEN: &str = "registration_open";

/// Free-form per-event settings. Only the form configuration lives here today.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EventSettings {
    pub disabled_standard_fields: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub status: String,
    pub settings: Json<EventSettings>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(name: String, description: Option<String>, event_date: NaiveDate, settings: EventSettings) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            event_date,
            status: "setup".to_string(),
            settings: Json(settings),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_registration_open(&self) -> bool {
        self.status == STATUS_REGISTRATION_OPEN
    }
}

pub fn is_valid_status(status: &str) -> bool {
    EVENT_STATUSES.contains(&status)
}

/// Event row plus the counters shown on the organizer dashboard.
#[derive(Debug, Serialize, Clone)]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub participant_count: i64,
    pub match_count: i64,
}

/// What an anonymous participant may see before registering.
#[derive(Debug, Serialize, Clone)]
pub struct PublicEvent {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub status: String,
    pub settings: EventSettings,
}

impl From<&Event> for PublicEvent {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            description: event.description.clone(),
            event_date: event.event_date,
            status: event.status.clone(),
            settings: event.settings.0.clone(),
        }
    }
}
