mod common;

use std::sync::Arc;
use async_trait::async_trait;
use axum::http::StatusCode;
use common::TestApp;
use matchmaking_backend::{
    domain::models::event::{Event, EventSettings},
    domain::ports::EventRepository,
    domain::services::form_config::{EventFormConfig, FormConfigService},
    error::AppError,
    state::Repositories,
};

/// Reads go through to the real store; settings writes always fail.
struct FailingSettingsRepo {
    inner: Arc<dyn EventRepository>,
}

#[async_trait]
impl EventRepository for FailingSettingsRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        self.inner.create(event).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        self.inner.list().await
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        self.inner.update(event).await
    }

    async fn update_settings(&self, _id: &str, _settings: &EventSettings) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.inner.delete(id).await
    }
}

fn with_failing_settings(repos: Repositories) -> Repositories {
    Repositories {
        event_repo: Arc::new(FailingSettingsRepo { inner: repos.event_repo }),
        ..repos
    }
}

#[tokio::test]
async fn test_failed_toggle_leaves_form_unchanged() {
    let app = TestApp::with_repositories(with_failing_settings).await;
    let event_id = app.create_event("registration_open").await;

    let (code, body) = app.request(
        "POST",
        &format!("/api/v1/events/{}/form-config/standard-fields/phone/toggle", event_id),
        None,
    ).await;
    assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (_, config) = app.request("GET", &format!("/api/v1/events/{}/form-config", event_id), None).await;
    assert_eq!(config["disabled_standard_fields"], serde_json::json!([]));

    let (_, form) = app.request("GET", &format!("/api/v1/events/{}/form/public", event_id), None).await;
    let keys: Vec<&str> = form["fields"].as_array().unwrap().iter().map(|f| f["key"].as_str().unwrap()).collect();
    assert!(keys.contains(&"phone"));
}

#[tokio::test]
async fn test_service_restores_config_after_write_failure() {
    let app = TestApp::with_repositories(with_failing_settings).await;
    let event_id = app.create_event("setup").await;

    let service = FormConfigService::new(app.state.event_repo.clone());
    let mut config = service.load(&event_id).await.unwrap();
    config.disabled_standard_keys.insert("bio".to_string());
    let before: EventFormConfig = config.clone();

    let err = service.toggle_standard_field(&mut config, "phone").await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(config, before);

    let err = service.toggle_standard_field(&mut config, "bio").await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
    assert!(config.is_disabled("bio"));

    // Validation failures never reach the repository.
    let err = service.toggle_standard_field(&mut config, "email").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidField(_)));
    assert_eq!(config, before);
}
