use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const MATCH_STATUSES: [&str; 4] = ["pending", "approved", "notified", "confirmed"];

/// A manual pairing of two participants, optionally seated at a venue.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Match {
    pub id: String,
    pub event_id: String,
    pub participant1_id: String,
    pub participant2_id: String,
    pub venue_id: Option<String>,
    pub compatibility_score: Option<i32>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewMatchParams {
    pub event_id: String,
    pub participant1_id: String,
    pub participant2_id: String,
    pub venue_id: Option<String>,
    pub compatibility_score: Option<i32>,
    pub notes: Option<String>,
}

impl Match {
    pub fn new(params: NewMatchParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            participant1_id: params.participant1_id,
            participant2_id: params.participant2_id,
            venue_id: params.venue_id,
            compatibility_score: params.compatibility_score,
            status: "pending".to_string(),
            notes: params.notes,
            created_at: Utc::now(),
        }
    }
}
