use std::sync::Arc;
use crate::domain::ports::{
    EventRepository, FormQuestionRepository, MatchRepository, ParticipantRepository, VenueRepository,
};
use crate::domain::services::{
    form_config::FormConfigService, form_view::FormView, matchmaking::MatchService,
    question_store::QuestionStore, registration::RegistrationService,
};

#[derive(Clone)]
pub struct AppState {
    pub event_repo: Arc<dyn EventRepository>,
    pub participant_repo: Arc<dyn ParticipantRepository>,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub match_repo: Arc<dyn MatchRepository>,
    pub form_config_service: Arc<FormConfigService>,
    pub question_store: Arc<QuestionStore>,
    pub form_view: Arc<FormView>,
    pub registration_service: Arc<RegistrationService>,
    pub match_service: Arc<MatchService>,
}

/// The five repositories every backend must provide.
pub struct Repositories {
    pub event_repo: Arc<dyn EventRepository>,
    pub question_repo: Arc<dyn FormQuestionRepository>,
    pub participant_repo: Arc<dyn ParticipantRepository>,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub match_repo: Arc<dyn MatchRepository>,
}

impl AppState {
    pub fn new(repos: Repositories) -> Self {
        let form_view = Arc::new(FormView::new(repos.event_repo.clone(), repos.question_repo.clone()));

        Self {
            form_config_service: Arc::new(FormConfigService::new(repos.event_repo.clone())),
            question_store: Arc::new(QuestionStore::new(repos.question_repo)),
            registration_service: Arc::new(RegistrationService::new(form_view.clone(), repos.participant_repo.clone())),
            match_service: Arc::new(MatchService::new(
                repos.participant_repo.clone(),
                repos.venue_repo.clone(),
                repos.match_repo.clone(),
            )),
            form_view,
            event_repo: repos.event_repo,
            participant_repo: repos.participant_repo,
            venue_repo: repos.venue_repo,
            match_repo: repos.match_repo,
        }
    }
}
