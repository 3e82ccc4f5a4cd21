use std::collections::BTreeSet;
use crate::domain::models::field::{FieldKind, FieldOrigin, FieldSpec};

pub const KEY_NAME: &str = "name";
pub const KEY_EMAIL: &str = "email";
pub const KEY_PHONE: &str = "phone";
pub const KEY_DATE_OF_BIRTH: &str = "date_of_birth";

/// Built-in field template shared by every event.
#[derive(Debug, Clone, Copy)]
pub struct StandardField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub options: &'static [&'static str],
    pub required: bool,
    pub disableable: bool,
}

impl StandardField {
    pub fn to_field_spec(&self, order: i32) -> FieldSpec {
        FieldSpec {
            key: self.key.to_string(),
            label: self.label.to_string(),
            kind: self.kind,
            options: self.options.iter().map(|o| o.to_string()).collect(),
            required: self.required,
            active: true,
            order,
            origin: FieldOrigin::Standard,
            disableable: self.disableable,
        }
    }
}

pub const STANDARD_FIELDS: [StandardField; 7] = [
    StandardField { key: KEY_NAME, label: "Full Name", kind: FieldKind::ShortText, options: &[], required: true, disableable: false },
    StandardField { key: KEY_EMAIL, label: "Email Address", kind: FieldKind::Email, options: &[], required: true, disableable: false },
    StandardField { key: KEY_PHONE, label: "Phone Number", kind: FieldKind::Phone, options: &[], required: true, disableable: true },
    StandardField { key: KEY_DATE_OF_BIRTH, label: "Date of Birth", kind: FieldKind::Date, options: &[], required: true, disableable: false },
    StandardField {
        key: "gender",
        label: "I am",
        kind: FieldKind::SingleSelect,
        options: &["Male", "Female", "Non-binary", "Other"],
        required: true,
        disableable: false,
    },
    StandardField {
        key: "interested_in",
        label: "Interested in",
        kind: FieldKind::SingleSelect,
        options: &["Men", "Women", "Everyone"],
        required: true,
        disableable: false,
    },
    StandardField { key: "bio", label: "Tell us about yourself", kind: FieldKind::LongText, options: &[], required: false, disableable: true },
];

pub fn lookup(key: &str) -> Option<&'static StandardField> {
    STANDARD_FIELDS.iter().find(|f| f.key == key)
}

pub fn all_fields() -> Vec<FieldSpec> {
    STANDARD_FIELDS.iter()
        .zip(1..)
        .map(|(f, order)| f.to_field_spec(order))
        .collect()
}

pub fn effective_fields(disabled: &BTreeSet<String>) -> Vec<FieldSpec> {
    all_fields()
        .into_iter()
        .filter(|f| !disabled.contains(&f.key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_seven_fields_and_two_are_disableable() {
        assert_eq!(STANDARD_FIELDS.len(), 7);
        let disableable: Vec<&str> = STANDARD_FIELDS.iter().filter(|f| f.disableable).map(|f| f.key).collect();
        assert_eq!(disableable, vec!["phone", "bio"]);
    }

    #[test]
    fn selection_fields_have_enough_options() {
        for field in STANDARD_FIELDS.iter().filter(|f| f.kind.is_selection()) {
            assert!(field.options.len() >= 2, "{} has too few options", field.key);
        }
    }

    #[test]
    fn effective_fields_skip_disabled_keys_and_keep_order() {
        let disabled: BTreeSet<String> = ["phone".to_string(), "bio".to_string()].into();
        let keys: Vec<String> = effective_fields(&disabled).into_iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["name", "email", "date_of_birth", "gender", "interested_in"]);

        let all = effective_fields(&BTreeSet::new());
        assert_eq!(all.len(), 7);
        assert_eq!(all[6].order, 7);
    }

    #[test]
    fn lookup_finds_known_keys_only() {
        assert_eq!(lookup("gender").map(|f| f.label), Some("I am"));
        assert!(lookup("favorite_hobby").is_none());
    }
}
