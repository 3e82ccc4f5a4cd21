use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, event, form_config, form_question, participant, venue, matching};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/v1/events/{event_id}/public", get(event::get_public_event))

        // Form configuration & rendered forms
        .route("/api/v1/events/{event_id}/form-config", get(form_config::get_form_config))
        .route("/api/v1/events/{event_id}/form-config/standard-fields/{key}/toggle", post(form_config::toggle_standard_field))
        .route("/api/v1/events/{event_id}/form/builder", get(form_config::builder_form))
        .route("/api/v1/events/{event_id}/form/preview", get(form_config::preview_form))
        .route("/api/v1/events/{event_id}/form/public", get(form_config::public_form))

        // Custom questions
        .route("/api/v1/events/{event_id}/form-questions", get(form_question::list_questions).post(form_question::create_question))
        .route("/api/v1/events/{event_id}/form-questions/public", get(form_question::list_public_questions))
        .route("/api/v1/events/{event_id}/form-questions/reorder", put(form_question::reorder_questions))
        .route("/api/v1/events/{event_id}/form-questions/{question_id}", get(form_question::get_question).put(form_question::update_question).delete(form_question::delete_question))
        .route("/api/v1/events/{event_id}/form-questions/{question_id}/move", post(form_question::move_question))

        // Participants
        .route("/api/v1/events/{event_id}/participants/register", post(participant::register_participant))
        .route("/api/v1/events/{event_id}/participants", get(participant::list_participants))
        .route("/api/v1/events/{event_id}/participants/{participant_id}", get(participant::get_participant).put(participant::update_participant).delete(participant::delete_participant))

        // Venues
        .route("/api/v1/events/{event_id}/venues", get(venue::list_venues).post(venue::create_venue))
        .route("/api/v1/events/{event_id}/venues/{venue_id}", get(venue::get_venue).put(venue::update_venue).delete(venue::delete_venue))

        // Matches
        .route("/api/v1/events/{event_id}/matches", get(matching::list_matches).post(matching::create_match))
        .route("/api/v1/events/{event_id}/matches/{match_id}", get(matching::get_match).put(matching::update_match).delete(matching::delete_match))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
