use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Venue {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub address: Option<String>,
    pub total_capacity: i32,
    pub available_slots: i32,
    pub min_age: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Venue {
    pub fn new(event_id: String, name: String, address: Option<String>, total_capacity: i32, min_age: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            address,
            total_capacity,
            available_slots: total_capacity,
            min_age,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

