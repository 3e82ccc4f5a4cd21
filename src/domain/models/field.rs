use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Input kind of a registration field.
///
/// The visible-choice variants are rendered with every option on screen
/// (radio buttons / checkboxes) instead of inside a dropdown. Legacy kind
/// names are accepted on input so older form payloads still deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[serde(alias = "text")]
    ShortText,
    #[serde(alias = "textarea")]
    LongText,
    #[serde(alias = "select")]
    SingleSelect,
    MultiSelect,
    #[serde(alias = "radio")]
    SingleSelectVisible,
    #[serde(alias = "checkbox")]
    MultiSelectVisible,
    Number,
    Email,
    Phone,
    Date,
}

impl FieldKind {
    pub const ALL: [FieldKind; 10] = [
        FieldKind::ShortText,
        FieldKind::LongText,
        FieldKind::SingleSelect,
        FieldKind::MultiSelect,
        FieldKind::SingleSelectVisible,
        FieldKind::MultiSelectVisible,
        FieldKind::Number,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::ShortText => "short_text",
            FieldKind::LongText => "long_text",
            FieldKind::SingleSelect => "single_select",
            FieldKind::MultiSelect => "multi_select",
            FieldKind::SingleSelectVisible => "single_select_visible",
            FieldKind::MultiSelectVisible => "multi_select_visible",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Date => "date",
        }
    }

    /// Kinds whose answers must be picked from `options`.
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            FieldKind::SingleSelect
                | FieldKind::MultiSelect
                | FieldKind::SingleSelectVisible
                | FieldKind::MultiSelectVisible
        )
    }

    /// Kinds whose answer is a list of chosen options.
    pub fn is_multi(&self) -> bool {
        matches!(self, FieldKind::MultiSelect | FieldKind::MultiSelectVisible)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_text" | "text" => Ok(FieldKind::ShortText),
            "long_text" | "textarea" => Ok(FieldKind::LongText),
            "single_select" | "select" => Ok(FieldKind::SingleSelect),
            "multi_select" => Ok(FieldKind::MultiSelect),
            "single_select_visible" | "radio" => Ok(FieldKind::SingleSelectVisible),
            "multi_select_visible" | "checkbox" => Ok(FieldKind::MultiSelectVisible),
            "number" => Ok(FieldKind::Number),
            "email" => Ok(FieldKind::Email),
            "phone" => Ok(FieldKind::Phone),
            "date" => Ok(FieldKind::Date),
            other => Err(format!("unknown field kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrigin {
    Standard,
    Custom,
}

/// One field of an event's registration form, standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub required: bool,
    pub active: bool,
    pub order: i32,
    pub origin: FieldOrigin,
    /// Only meaningful for standard fields; custom questions are never "disabled",
    /// they are deactivated or deleted instead.
    pub disableable: bool,
}

/// A single answer: free text for scalar kinds, chosen options for multi-select kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn empty_for(kind: FieldKind) -> Self {
        if kind.is_multi() {
            AnswerValue::Choices(Vec::new())
        } else {
            AnswerValue::Text(String::new())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Choices(c) => c.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s.as_str()),
            AnswerValue::Choices(_) => None,
        }
    }
}

/// Answers keyed by `FieldSpec::key`.
pub type AnswerMap = BTreeMap<String, AnswerValue>;
