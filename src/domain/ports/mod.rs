use crate::domain::models::{
    event::{Event, EventSettings}, form_question::FormQuestion, participant::Participant,
    venue::Venue, matching::Match,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Replaces the settings document only, leaving the rest of the row untouched.
    async fn update_settings(&self, id: &str, settings: &EventSettings) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait FormQuestionRepository: Send + Sync {
    async fn create(&self, question: &FormQuestion) -> Result<FormQuestion, AppError>;
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<FormQuestion>, AppError>;
    /// Ordered by `display_order`, ties broken by creation time.
    async fn list_by_event(&self, event_id: &str, active_only: bool) -> Result<Vec<FormQuestion>, AppError>;
    async fn update(&self, question: &FormQuestion) -> Result<FormQuestion, AppError>;
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError>;
    /// Applies every `(id, display_order)` pair or none of them.
    async fn reorder(&self, event_id: &str, orders: &[(String, i32)]) -> Result<(), AppError>;
}

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    async fn create(&self, participant: &Participant) -> Result<Participant, AppError>;
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Participant>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Participant>, AppError>;
    async fn email_exists(&self, event_id: &str, email: &str) -> Result<bool, AppError>;
    async fn update(&self, participant: &Participant) -> Result<Participant, AppError>;
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError>;
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Venue>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Venue>, AppError>;
    /// `available_slots` is recomputed from the new capacity and the matches seated there.
    async fn update(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn deactivate(&self, event_id: &str, id: &str) -> Result<(), AppError>;
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Inserts the match and claims one slot of its venue in the same transaction.
    async fn create(&self, m: &Match) -> Result<Match, AppError>;
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Match>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Match>, AppError>;
    /// Persists the match. If `m.venue_id` differs from `previous_venue_id`, the
    /// new slot is claimed and the old venue's free slots recounted in the same transaction.
    async fn update(&self, m: &Match, previous_venue_id: Option<&str>) -> Result<Match, AppError>;
    /// Deletes the match and recounts its venue's free slots.
    async fn delete(&self, m: &Match) -> Result<(), AppError>;
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
    async fn count_by_venue(&self, venue_id: &str) -> Result<i64, AppError>;
}
