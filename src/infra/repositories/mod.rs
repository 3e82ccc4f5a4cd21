pub mod sqlite_event_repo;
pub mod sqlite_form_question_repo;
pub mod sqlite_participant_repo;
pub mod sqlite_venue_repo;
pub mod sqlite_match_repo;

pub mod postgres_event_repo;
pub mod postgres_form_question_repo;
pub mod postgres_participant_repo;
pub mod postgres_venue_repo;
pub mod postgres_match_repo;
