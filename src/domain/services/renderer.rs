use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::domain::models::field::{AnswerMap, AnswerValue, FieldKind, FieldOrigin, FieldSpec};
use crate::domain::services::registration::{self, ValidatedSubmission};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    TextInput,
    TextArea,
    Dropdown { options: Vec<String>, multiple: bool },
    RadioGroup { options: Vec<String> },
    CheckboxGroup { options: Vec<String> },
    NumberInput,
    EmailInput,
    PhoneInput,
    DateInput,
}

pub fn widget_for(field: &FieldSpec) -> Widget {
    let options = field.options.clone();
    match field.kind {
        FieldKind::ShortText => Widget::TextInput,
        FieldKind::LongText => Widget::TextArea,
        FieldKind::SingleSelect => Widget::Dropdown { options, multiple: false },
        FieldKind::MultiSelect => Widget::Dropdown { options, multiple: true },
        FieldKind::SingleSelectVisible => Widget::RadioGroup { options },
        FieldKind::MultiSelectVisible => Widget::CheckboxGroup { options },
        FieldKind::Number => Widget::NumberInput,
        FieldKind::Email => Widget::EmailInput,
        FieldKind::Phone => Widget::PhoneInput,
        FieldKind::Date => Widget::DateInput,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Builder,
    Preview,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub origin: FieldOrigin,
    pub order: i32,
    pub required: bool,
    pub active: bool,
    pub disableable: bool,
    pub editable: bool,
    #[serde(flatten)]
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AnswerValue>,
}

pub fn render_fields(fields: &[FieldSpec], answers: Option<&AnswerMap>, mode: RenderMode) -> Vec<RenderedField> {
    fields.iter()
        .filter(|f| mode == RenderMode::Builder || f.active)
        .map(|f| RenderedField {
            key: f.key.clone(),
            label: f.label.clone(),
            kind: f.kind,
            origin: f.origin,
            order: f.order,
            required: f.required,
            active: f.active,
            disableable: f.disableable,
            editable: mode == RenderMode::Preview,
            widget: widget_for(f),
            value: answers.and_then(|a| a.get(&f.key)).cloned(),
        })
        .collect()
}

pub fn validate_answer(field: &FieldSpec, value: &AnswerValue) -> Result<(), AppError> {
    let invalid = |what: &str| AppError::Validation(format!("{}: {}", field.label, what));

    match field.kind {
        FieldKind::ShortText | FieldKind::LongText => {
            value.as_text().ok_or_else(|| invalid("expected text"))?;
        }
        FieldKind::SingleSelect | FieldKind::SingleSelectVisible => {
            let choice = value.as_text().ok_or_else(|| invalid("expected a single choice"))?;
            if !field.options.iter().any(|o| o == choice) {
                return Err(invalid("not one of the available options"));
            }
        }
        FieldKind::MultiSelect | FieldKind::MultiSelectVisible => {
            let AnswerValue::Choices(choices) = value else {
                return Err(invalid("expected a list of choices"));
            };
            if let Some(bad) = choices.iter().find(|c| !field.options.contains(*c)) {
                return Err(invalid(&format!("'{}' is not one of the available options", bad)));
            }
        }
        FieldKind::Number => {
            let text = value.as_text().ok_or_else(|| invalid("expected a number"))?;
            if text.trim().parse::<f64>().map_or(true, |n| !n.is_finite()) {
                return Err(invalid("expected a number"));
            }
        }
        FieldKind::Email => {
            let text = value.as_text().ok_or_else(|| invalid("expected an email address"))?;
            if !looks_like_email(text.trim()) {
                return Err(invalid("invalid email address"));
            }
        }
        FieldKind::Phone => {
            let text = value.as_text().ok_or_else(|| invalid("expected a phone number"))?;
            if !looks_like_phone(text.trim()) {
                return Err(invalid("invalid phone number"));
            }
        }
        FieldKind::Date => {
            let text = value.as_text().ok_or_else(|| invalid("expected a date"))?;
            parse_date(text).ok_or_else(|| invalid("expected a date in YYYY-MM-DD format"))?;
        }
    }
    Ok(())
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !s.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}

fn looks_like_phone(s: &str) -> bool {
    let digits = s.chars().filter(char::is_ascii_digit).count();
    digits >= 7 && s.chars().all(|c| c.is_ascii_digit() || " +-().".contains(c))
}

/// Answer collection for one participant filling in the form.
#[derive(Debug, Clone)]
pub struct FormSession {
    fields: Vec<FieldSpec>,
    answers: AnswerMap,
}

impl FormSession {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let fields: Vec<FieldSpec> = fields.into_iter().filter(|f| f.active).collect();
        let answers = fields.iter()
            .map(|f| (f.key.clone(), AnswerValue::empty_for(f.kind)))
            .collect();
        Self { fields, answers }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    fn field(&self, key: &str) -> Result<&FieldSpec, AppError> {
        self.fields.iter()
            .find(|f| f.key == key)
            .ok_or_else(|| AppError::Validation(format!("unknown field '{}'", key)))
    }

    pub fn set_answer(&mut self, key: &str, value: AnswerValue) -> Result<(), AppError> {
        let field = self.field(key)?;
        if field.kind.is_multi() != matches!(value, AnswerValue::Choices(_)) {
            return Err(AppError::Validation(format!("{}: wrong answer shape", field.label)));
        }
        self.answers.insert(key.to_string(), value);
        Ok(())
    }

    pub fn toggle_option(&mut self, key: &str, option: &str) -> Result<bool, AppError> {
        let field = self.field(key)?;
        if !field.kind.is_multi() {
            return Err(AppError::Validation(format!("{}: not a multi-select field", field.label)));
        }
        if !field.options.iter().any(|o| o == option) {
            return Err(AppError::Validation(format!("{}: '{}' is not one of the available options", field.label, option)));
        }

        if let Some(AnswerValue::Choices(choices)) = self.answers.get_mut(key) {
            return Ok(match choices.iter().position(|c| c == option) {
                Some(pos) => {
                    choices.remove(pos);
                    false
                }
                None => {
                    choices.push(option.to_string());
                    true
                }
            });
        }

        self.answers.insert(key.to_string(), AnswerValue::Choices(vec![option.to_string()]));
        Ok(true)
    }

    // Shapes are checked on submit, after the required pass.
    pub fn fill(&mut self, submitted: AnswerMap) {
        for (key, value) in submitted {
            if self.fields.iter().any(|f| f.key == key) {
                self.answers.insert(key, value);
            } else {
                debug!("Dropping answer for inactive or unknown field '{}'", key);
            }
        }
    }

    pub fn submit(self, today: NaiveDate) -> Result<ValidatedSubmission, AppError> {
        registration::validate_submission(&self.fields, self.answers, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::catalog;

    fn custom(key: &str, kind: FieldKind, options: &[&str], active: bool) -> FieldSpec {
        FieldSpec {
            key: key.to_string(),
            label: key.replace('_', " "),
            kind,
            options: options.iter().map(|o| o.to_string()).collect(),
            required: false,
            active,
            order: 1,
            origin: FieldOrigin::Custom,
            disableable: false,
        }
    }

    fn sample_answer(field: &FieldSpec) -> AnswerValue {
        match field.kind {
            FieldKind::ShortText | FieldKind::LongText => AnswerValue::Text("hello".into()),
            FieldKind::SingleSelect | FieldKind::SingleSelectVisible => AnswerValue::Text(field.options[0].clone()),
            FieldKind::MultiSelect | FieldKind::MultiSelectVisible => AnswerValue::Choices(vec![field.options[1].clone()]),
            FieldKind::Number => AnswerValue::Text("42".into()),
            FieldKind::Email => AnswerValue::Text("ana@example.com".into()),
            FieldKind::Phone => AnswerValue::Text("+1 (555) 123-4567".into()),
            FieldKind::Date => AnswerValue::Text("1990-05-17".into()),
        }
    }

    #[test]
    fn every_kind_renders_and_validates() {
        for kind in FieldKind::ALL {
            let options: &[&str] = if kind.is_selection() { &["A", "B"] } else { &[] };
            let field = custom("q", kind, options, true);

            let widget = widget_for(&field);
            if kind.is_selection() {
                assert!(matches!(
                    widget,
                    Widget::Dropdown { .. } | Widget::RadioGroup { .. } | Widget::CheckboxGroup { .. }
                ), "{} should render a choice widget", kind);
            }

            assert!(validate_answer(&field, &sample_answer(&field)).is_ok(), "{} sample rejected", kind);
        }
    }

    #[test]
    fn visible_kinds_render_as_groups() {
        let radio = custom("q", FieldKind::SingleSelectVisible, &["A", "B"], true);
        let check = custom("q", FieldKind::MultiSelectVisible, &["A", "B"], true);
        assert_eq!(widget_for(&radio), Widget::RadioGroup { options: vec!["A".into(), "B".into()] });
        assert_eq!(widget_for(&check), Widget::CheckboxGroup { options: vec!["A".into(), "B".into()] });
    }

    #[test]
    fn preview_hides_inactive_fields_builder_keeps_them() {
        let fields = vec![
            custom("visible", FieldKind::ShortText, &[], true),
            custom("hidden", FieldKind::ShortText, &[], false),
        ];
        assert_eq!(render_fields(&fields, None, RenderMode::Builder).len(), 2);

        let preview = render_fields(&fields, None, RenderMode::Preview);
        assert_eq!(preview.len(), 1);
        assert_eq!(preview[0].key, "visible");
    }

    #[test]
    fn rendered_fields_carry_existing_answers() {
        let fields = vec![custom("hobby", FieldKind::ShortText, &[], true)];
        let answers: AnswerMap = [("hobby".to_string(), AnswerValue::Text("chess".into()))].into();
        let rendered = render_fields(&fields, Some(&answers), RenderMode::Preview);
        assert_eq!(rendered[0].value, Some(AnswerValue::Text("chess".into())));
    }

    #[test]
    fn answers_of_the_wrong_kind_are_rejected() {
        let select = custom("drink", FieldKind::SingleSelect, &["Tea", "Coffee"], true);
        assert!(validate_answer(&select, &AnswerValue::Text("Beer".into())).is_err());

        let multi = custom("hobbies", FieldKind::MultiSelect, &["Reading", "Hiking"], true);
        assert!(validate_answer(&multi, &AnswerValue::Text("Reading".into())).is_err());

        let number = custom("height", FieldKind::Number, &[], true);
        assert!(validate_answer(&number, &AnswerValue::Text("tall".into())).is_err());

        let email = custom("mail", FieldKind::Email, &[], true);
        assert!(validate_answer(&email, &AnswerValue::Text("not-an-email".into())).is_err());

        let date = custom("when", FieldKind::Date, &[], true);
        assert!(validate_answer(&date, &AnswerValue::Text("17/05/1990".into())).is_err());
    }

    #[test]
    fn session_starts_with_empty_answers_for_active_fields() {
        let session = FormSession::new(vec![
            custom("hobbies", FieldKind::MultiSelectVisible, &["Reading", "Hiking"], true),
            custom("bio", FieldKind::LongText, &[], true),
            custom("old", FieldKind::ShortText, &[], false),
        ]);
        assert_eq!(session.fields().len(), 2);
        assert_eq!(session.answers()["hobbies"], AnswerValue::Choices(vec![]));
        assert_eq!(session.answers()["bio"], AnswerValue::Text(String::new()));
        assert!(!session.answers().contains_key("old"));
    }

    #[test]
    fn toggle_option_flips_membership() {
        let mut session = FormSession::new(vec![
            custom("hobbies", FieldKind::MultiSelect, &["Reading", "Hiking", "Cooking"], true),
        ]);

        assert!(session.toggle_option("hobbies", "Hiking").unwrap());
        assert!(session.toggle_option("hobbies", "Reading").unwrap());
        assert!(!session.toggle_option("hobbies", "Hiking").unwrap());
        assert_eq!(session.answers()["hobbies"], AnswerValue::Choices(vec!["Reading".into()]));

        assert!(session.toggle_option("hobbies", "Skydiving").is_err());
    }

    #[test]
    fn set_answer_replaces_single_values() {
        let mut session = FormSession::new(vec![custom("drink", FieldKind::SingleSelectVisible, &["Tea", "Coffee"], true)]);
        session.set_answer("drink", AnswerValue::Text("Tea".into())).unwrap();
        session.set_answer("drink", AnswerValue::Text("Coffee".into())).unwrap();
        assert_eq!(session.answers()["drink"], AnswerValue::Text("Coffee".into()));

        assert!(session.toggle_option("drink", "Tea").is_err());
        assert!(session.set_answer("drink", AnswerValue::Choices(vec!["Tea".into()])).is_err());
    }

    #[test]
    fn fill_drops_answers_for_fields_not_on_the_form() {
        let mut disabled = std::collections::BTreeSet::new();
        disabled.insert(catalog::KEY_PHONE.to_string());
        let mut session = FormSession::new(catalog::effective_fields(&disabled));

        let submitted: AnswerMap = [
            ("phone".to_string(), AnswerValue::Text("555-0000".into())),
            ("name".to_string(), AnswerValue::Text("Ana".into())),
        ].into();
        session.fill(submitted);

        assert!(!session.answers().contains_key("phone"));
        assert_eq!(session.answers()["name"], AnswerValue::Text("Ana".into()));
    }

    #[test]
    fn missing_required_answer_is_reported_before_a_later_shape_error() {
        let mut session = FormSession::new(catalog::all_fields());
        let submitted: AnswerMap = [
            ("email".to_string(), AnswerValue::Text("ana@example.com".into())),
            ("bio".to_string(), AnswerValue::Choices(vec!["climbing".into()])),
        ].into();
        session.fill(submitted);

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let err = session.submit(today).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Please answer: Full Name"));
    }
}
