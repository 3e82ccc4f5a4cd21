use std::collections::HashSet;
use std::sync::Arc;
use serde::Deserialize;
use tracing::info;

use crate::domain::models::field::FieldKind;
use crate::domain::models::form_question::{FormQuestion, NewFormQuestionParams};
use crate::domain::ports::FormQuestionRepository;
use crate::domain::services::catalog;
use crate::error::AppError;

pub const MAX_KEY_LEN: usize = 30;
pub const MIN_SELECTION_OPTIONS: usize = 2;

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub key: Option<String>,
    pub label: String,
    pub kind: FieldKind,
    pub options: Vec<String>,
    pub required: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub label: Option<String>,
    pub kind: Option<FieldKind>,
    pub options: Option<Vec<String>>,
    pub required: Option<bool>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Lowercased ASCII letters and digits, whitespace runs as `_`, at most 30 characters.
pub fn derive_key(label: &str) -> String {
    let mut key = String::new();
    let mut in_space = false;

    for c in label.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                key.push('_');
                in_space = true;
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            key.push(c);
            in_space = false;
        }
    }

    let truncated: String = key.chars().take(MAX_KEY_LEN).collect();
    truncated.trim_matches('_').to_string()
}

pub fn unique_key(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut n = 2;
    loop {
        let suffix = format!("_{}", n);
        let stem: String = base.chars().take(MAX_KEY_LEN - suffix.len()).collect();
        let candidate = format!("{}{}", stem, suffix);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

pub fn normalize_options(kind: FieldKind, options: Vec<String>) -> Vec<String> {
    if !kind.is_selection() {
        return Vec::new();
    }
    options.into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

pub fn validate_question(label: &str, kind: FieldKind, options: &[String]) -> Result<(), AppError> {
    if label.trim().is_empty() {
        return Err(AppError::Validation("missing question text".into()));
    }
    if kind.is_selection() && options.len() < MIN_SELECTION_OPTIONS {
        return Err(AppError::Validation("insufficient options".into()));
    }
    Ok(())
}

pub struct QuestionStore {
    repo: Arc<dyn FormQuestionRepository>,
}

impl QuestionStore {
    pub fn new(repo: Arc<dyn FormQuestionRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, event_id: &str, public_only: bool) -> Result<Vec<FormQuestion>, AppError> {
        self.repo.list_by_event(event_id, public_only).await
    }

    pub async fn get(&self, event_id: &str, id: &str) -> Result<FormQuestion, AppError> {
        self.repo.find_by_id(event_id, id).await?
            .ok_or(AppError::NotFound("Form question not found".into()))
    }

    pub async fn add(&self, event_id: &str, new: NewQuestion) -> Result<FormQuestion, AppError> {
        let label = new.label.trim().to_string();
        let options = normalize_options(new.kind, new.options);
        validate_question(&label, new.kind, &options)?;

        let existing = self.repo.list_by_event(event_id, false).await?;
        let taken: HashSet<String> = existing.iter()
            .map(|q| q.question_key.clone())
            .chain(catalog::STANDARD_FIELDS.iter().map(|f| f.key.to_string()))
            .collect();

        let explicit_key = new.key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let key = match explicit_key {
            Some(key) => {
                if !is_valid_key(&key) {
                    return Err(AppError::Validation(format!("invalid question key '{}'", key)));
                }
                if taken.contains(&key) {
                    return Err(AppError::Validation(format!("question key '{}' is already in use", key)));
                }
                key
            }
            None => {
                let base = derive_key(&label);
                if base.is_empty() {
                    return Err(AppError::Validation("could not derive a question key from the question text".into()));
                }
                unique_key(&base, &taken)
            }
        };

        let question = FormQuestion::new(NewFormQuestionParams {
            event_id: event_id.to_string(),
            question_key: key,
            label,
            kind: new.kind,
            options,
            is_required: new.required,
            is_active: new.active,
            display_order: existing.len() as i32 + 1,
        });

        let created = self.repo.create(&question).await?;
        info!("Added question '{}' to event {} at position {}", created.question_key, event_id, created.display_order);
        Ok(created)
    }

    pub async fn update(&self, event_id: &str, id: &str, patch: QuestionPatch) -> Result<FormQuestion, AppError> {
        let mut question = self.get(event_id, id).await?;

        let kind = match patch.kind {
            Some(kind) => kind,
            None => question.field_kind()?,
        };
        let label = patch.label.map(|l| l.trim().to_string()).unwrap_or_else(|| question.label.clone());
        let options = normalize_options(kind, patch.options.unwrap_or_else(|| question.options.0.clone()));
        validate_question(&label, kind, &options)?;

        question.label = label;
        question.kind = kind.as_str().to_string();
        question.options.0 = options;
        if let Some(required) = patch.required { question.is_required = required; }
        if let Some(active) = patch.active { question.is_active = active; }

        let updated = self.repo.update(&question).await?;
        info!("Updated question '{}' on event {}", updated.question_key, event_id);
        Ok(updated)
    }

    pub async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        self.repo.delete(event_id, id).await?;
        info!("Deleted question {} from event {}", id, event_id);
        Ok(())
    }

    pub async fn reorder(&self, event_id: &str, ordered_ids: &[String]) -> Result<Vec<FormQuestion>, AppError> {
        let existing = self.repo.list_by_event(event_id, false).await?;

        let current: HashSet<&str> = existing.iter().map(|q| q.id.as_str()).collect();
        let submitted: HashSet<&str> = ordered_ids.iter().map(String::as_str).collect();

        if submitted.len() != ordered_ids.len() {
            return Err(AppError::Validation("reorder list contains duplicate ids".into()));
        }
        if submitted != current {
            return Err(AppError::Validation("reorder list must contain exactly the event's questions".into()));
        }

        self.persist_order(event_id, ordered_ids.iter().cloned()).await
    }

    pub async fn move_adjacent(&self, event_id: &str, id: &str, direction: Direction) -> Result<Vec<FormQuestion>, AppError> {
        let mut questions = self.repo.list_by_event(event_id, false).await?;
        let index = questions.iter().position(|q| q.id == id)
            .ok_or(AppError::NotFound("Form question not found".into()))?;

        let neighbour = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < questions.len() => index + 1,
            _ => return Ok(questions),
        };

        questions.swap(index, neighbour);
        self.persist_order(event_id, questions.into_iter().map(|q| q.id)).await
    }

    async fn persist_order(&self, event_id: &str, ids: impl Iterator<Item = String>) -> Result<Vec<FormQuestion>, AppError> {
        let orders: Vec<(String, i32)> = ids.zip(1..).collect();
        self.repo.reorder(event_id, &orders).await?;
        info!("Reordered {} questions on event {}", orders.len(), event_id);
        self.repo.list_by_event(event_id, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_slugifies_label() {
        assert_eq!(derive_key("Favorite Hobby?"), "favorite_hobby");
        assert_eq!(derive_key("What's   your\tstar sign"), "whats_your_star_sign");
        assert_eq!(derive_key("Héllo Wörld 2"), "hllo_wrld_2");
    }

    #[test]
    fn derive_key_truncates_to_thirty_characters() {
        let key = derive_key("If you could travel anywhere in the world where would you go");
        assert_eq!(key.len(), MAX_KEY_LEN);
        assert_eq!(key, "if_you_could_travel_anywhere_i");
    }

    #[test]
    fn derive_key_of_punctuation_is_empty() {
        assert_eq!(derive_key("???"), "");
    }

    #[test]
    fn unique_key_appends_suffix_on_collision() {
        let taken: HashSet<String> = ["whats_your_hobby".into(), "whats_your_hobby_2".into()].into();
        assert_eq!(unique_key("whats_your_hobby", &taken), "whats_your_hobby_3");
        assert_eq!(unique_key("fresh", &taken), "fresh");

        let long = "a".repeat(MAX_KEY_LEN);
        let taken: HashSet<String> = [long.clone()].into();
        let resolved = unique_key(&long, &taken);
        assert_eq!(resolved.len(), MAX_KEY_LEN);
        assert!(resolved.ends_with("_2"));
    }

    #[test]
    fn selection_kinds_need_two_options() {
        for kind in FieldKind::ALL.into_iter().filter(FieldKind::is_selection) {
            let err = validate_question("Favorite Hobby?", kind, &["Reading".into()]).unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == "insufficient options"));
            assert!(validate_question("Favorite Hobby?", kind, &["Reading".into(), "Hiking".into()]).is_ok());
        }
        assert!(validate_question("Favorite Hobby?", FieldKind::ShortText, &[]).is_ok());
    }

    #[test]
    fn blank_label_is_missing_question_text() {
        let err = validate_question("   ", FieldKind::ShortText, &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "missing question text"));
    }

    #[test]
    fn normalize_options_trims_and_clears_for_plain_kinds() {
        let opts = vec![" Reading ".to_string(), "".to_string(), "Hiking".to_string()];
        assert_eq!(normalize_options(FieldKind::MultiSelect, opts.clone()), vec!["Reading", "Hiking"]);
        assert!(normalize_options(FieldKind::Number, opts).is_empty());
    }

    #[test]
    fn explicit_keys_must_be_snake_case() {
        assert!(is_valid_key("shoe_size_2"));
        assert!(!is_valid_key("Shoe Size"));
        assert!(!is_valid_key(&"k".repeat(31)));
    }
}
