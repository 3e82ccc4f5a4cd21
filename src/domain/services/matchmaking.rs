use std::sync::Arc;
use tracing::info;

use crate::domain::models::matching::{Match, NewMatchParams, MATCH_STATUSES};
use crate::domain::models::participant::Participant;
use crate::domain::models::venue::Venue;
use crate::domain::ports::{MatchRepository, ParticipantRepository, VenueRepository};
use crate::error::AppError;

pub struct MatchDraft {
    pub participant1_id: String,
    pub participant2_id: String,
    pub venue_id: Option<String>,
    pub compatibility_score: Option<i32>,
    pub notes: Option<String>,
}

/// Unset fields keep their stored value.
#[derive(Debug, Default)]
pub struct MatchPatch {
    pub venue_id: Option<String>,
    pub compatibility_score: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

fn validate_score(score: Option<i32>) -> Result<(), AppError> {
    match score {
        Some(s) if !(0..=100).contains(&s) => {
            Err(AppError::Validation("compatibility_score must be between 0 and 100".into()))
        }
        _ => Ok(()),
    }
}

pub struct MatchService {
    participant_repo: Arc<dyn ParticipantRepository>,
    venue_repo: Arc<dyn VenueRepository>,
    match_repo: Arc<dyn MatchRepository>,
}

impl MatchService {
    pub fn new(
        participant_repo: Arc<dyn ParticipantRepository>,
        venue_repo: Arc<dyn VenueRepository>,
        match_repo: Arc<dyn MatchRepository>,
    ) -> Self {
        Self { participant_repo, venue_repo, match_repo }
    }

    pub async fn get(&self, event_id: &str, match_id: &str) -> Result<Match, AppError> {
        self.match_repo.find_by_id(event_id, match_id).await?
            .ok_or(AppError::NotFound("Match not found".into()))
    }

    async fn participant(&self, event_id: &str, id: &str) -> Result<Participant, AppError> {
        self.participant_repo.find_by_id(event_id, id).await?
            .ok_or_else(|| AppError::Validation(format!("Participant {} is not registered for this event", id)))
    }

    async fn bookable_venue(&self, event_id: &str, venue_id: &str, pair: [&Participant; 2]) -> Result<Venue, AppError> {
        let venue = self.venue_repo.find_by_id(event_id, venue_id).await?
            .ok_or_else(|| AppError::Validation(format!("Venue {} does not belong to this event", venue_id)))?;

        if !venue.is_active {
            return Err(AppError::Validation(format!("Venue '{}' is not active", venue.name)));
        }
        if venue.available_slots <= 0 {
            return Err(AppError::Conflict(format!("Venue '{}' has no available slots", venue.name)));
        }
        if let Some(p) = pair.iter().find(|p| p.age < venue.min_age) {
            return Err(AppError::Validation(format!(
                "{} does not meet the minimum age of {} for '{}'", p.name, venue.min_age, venue.name
            )));
        }
        Ok(venue)
    }

    pub async fn create(&self, event_id: &str, draft: MatchDraft) -> Result<Match, AppError> {
        if draft.participant1_id == draft.participant2_id {
            return Err(AppError::Validation("A participant cannot be matched with themselves".into()));
        }
        validate_score(draft.compatibility_score)?;

        let p1 = self.participant(event_id, &draft.participant1_id).await?;
        let p2 = self.participant(event_id, &draft.participant2_id).await?;

        if let Some(venue_id) = &draft.venue_id {
            self.bookable_venue(event_id, venue_id, [&p1, &p2]).await?;
        }

        let m = Match::new(NewMatchParams {
            event_id: event_id.to_string(),
            participant1_id: draft.participant1_id,
            participant2_id: draft.participant2_id,
            venue_id: draft.venue_id,
            compatibility_score: draft.compatibility_score,
            notes: draft.notes,
        });

        let created = self.match_repo.create(&m).await?;
        info!("Matched {} with {} for event {}", created.participant1_id, created.participant2_id, event_id);
        Ok(created)
    }

    pub async fn update(&self, event_id: &str, match_id: &str, patch: MatchPatch) -> Result<Match, AppError> {
        let mut m = self.get(event_id, match_id).await?;
        validate_score(patch.compatibility_score)?;

        if let Some(status) = patch.status {
            if !MATCH_STATUSES.contains(&status.as_str()) {
                return Err(AppError::Validation(format!("Invalid match status '{}'", status)));
            }
            m.status = status;
        }
        if patch.compatibility_score.is_some() {
            m.compatibility_score = patch.compatibility_score;
        }
        if patch.notes.is_some() {
            m.notes = patch.notes;
        }

        let previous_venue = m.venue_id.clone();
        if let Some(venue_id) = patch.venue_id.filter(|v| Some(v) != previous_venue.as_ref()) {
            let p1 = self.participant(event_id, &m.participant1_id).await?;
            let p2 = self.participant(event_id, &m.participant2_id).await?;
            self.bookable_venue(event_id, &venue_id, [&p1, &p2]).await?;
            info!("Moving match {} to venue {}", m.id, venue_id);
            m.venue_id = Some(venue_id);
        }

        self.match_repo.update(&m, previous_venue.as_deref()).await
    }

    pub async fn delete(&self, event_id: &str, match_id: &str) -> Result<(), AppError> {
        let m = self.get(event_id, match_id).await?;
        self.match_repo.delete(&m).await?;
        info!("Deleted match {} from event {}", m.id, event_id);
        Ok(())
    }
}
