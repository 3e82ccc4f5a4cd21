use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::event::{Event, EventSettings};
use crate::domain::models::field::FieldSpec;
use crate::domain::ports::EventRepository;
use crate::domain::services::catalog;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct EventFormConfig {
    pub event_id: String,
    pub disabled_standard_keys: BTreeSet<String>,
}

/// A toggle applied locally but not yet acknowledged by the repository.
#[must_use = "a pending toggle must be confirmed or rolled back"]
#[derive(Debug)]
pub struct PendingToggle {
    key: String,
    now_disabled: bool,
}

impl PendingToggle {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn confirm(self) -> bool {
        self.now_disabled
    }
}

impl EventFormConfig {
    pub fn new(event_id: String) -> Self {
        Self { event_id, disabled_standard_keys: BTreeSet::new() }
    }

    pub fn from_event(event: &Event) -> Self {
        let mut disabled = BTreeSet::new();
        for key in &event.settings.disabled_standard_fields {
            if catalog::lookup(key).is_some_and(|f| f.disableable) {
                disabled.insert(key.clone());
            } else {
                warn!("Ignoring stored disabled key '{}' on event {}", key, event.id);
            }
        }
        Self { event_id: event.id.clone(), disabled_standard_keys: disabled }
    }

    pub fn is_disabled(&self, key: &str) -> bool {
        self.disabled_standard_keys.contains(key)
    }

    pub fn effective_standard_fields(&self) -> Vec<FieldSpec> {
        catalog::effective_fields(&self.disabled_standard_keys)
    }

    pub fn to_settings(&self) -> EventSettings {
        EventSettings {
            disabled_standard_fields: self.disabled_standard_keys.iter().cloned().collect(),
        }
    }

    pub fn begin_toggle(&mut self, key: &str) -> Result<PendingToggle, AppError> {
        ensure_disableable(key)?;

        let now_disabled = if self.disabled_standard_keys.remove(key) {
            false
        } else {
            self.disabled_standard_keys.insert(key.to_string());
            true
        };

        Ok(PendingToggle { key: key.to_string(), now_disabled })
    }

    pub fn rollback(&mut self, pending: PendingToggle) {
        if pending.now_disabled {
            self.disabled_standard_keys.remove(&pending.key);
        } else {
            self.disabled_standard_keys.insert(pending.key);
        }
    }
}

fn ensure_disableable(key: &str) -> Result<(), AppError> {
    match catalog::lookup(key) {
        Some(field) if field.disableable => Ok(()),
        Some(_) => Err(AppError::InvalidField(format!("Standard field '{}' cannot be disabled", key))),
        None => Err(AppError::InvalidField(format!("'{}' is not a standard field", key))),
    }
}

pub fn validate_disabled_keys(keys: &[String]) -> Result<BTreeSet<String>, AppError> {
    keys.iter()
        .map(|k| ensure_disableable(k).map(|_| k.clone()))
        .collect()
}

pub struct FormConfigService {
    event_repo: Arc<dyn EventRepository>,
}

impl FormConfigService {
    pub fn new(event_repo: Arc<dyn EventRepository>) -> Self {
        Self { event_repo }
    }

    pub async fn load(&self, event_id: &str) -> Result<EventFormConfig, AppError> {
        let event = self.event_repo.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;
        Ok(EventFormConfig::from_event(&event))
    }

    /// Flips a disableable standard field and persists the new set; `config` is restored if the write fails.
    pub async fn toggle_standard_field(&self, config: &mut EventFormConfig, key: &str) -> Result<bool, AppError> {
        let pending = config.begin_toggle(key)?;

        match self.event_repo.update_settings(&config.event_id, &config.to_settings()).await {
            Ok(()) => {
                let disabled = pending.confirm();
                info!("Standard field '{}' {} for event {}", key, if disabled { "disabled" } else { "enabled" }, config.event_id);
                Ok(disabled)
            }
            Err(e) => {
                warn!("Reverting toggle of '{}' on event {}: {}", pending.key(), config.event_id, e);
                config.rollback(pending);
                Err(e)
            }
        }
    }
}
