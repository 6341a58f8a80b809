// Per-field validation rules

use crate::models::form::{Field, Section};
use crate::utils::validation::{is_blank, parse_non_negative_number};

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_POSITIVE_NUMBER: &str = "Please enter a valid positive number";

/// One failed check on one field. A field may produce several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub field: String,
    pub message: &'static str,
}

/// Every field is required; numeric fields must also hold a finite, non-negative number.
/// An empty numeric field fails both checks.
pub fn validate_field(field: &Field) -> Vec<ValidationResult> {
    let mut out = Vec::new();

    if is_blank(&field.value) {
        out.push(ValidationResult {
            field: field.name().to_string(),
            message: MSG_REQUIRED,
        });
    }

    if field.kind().is_numeric() && parse_non_negative_number(&field.value).is_none() {
        out.push(ValidationResult {
            field: field.name().to_string(),
            message: MSG_POSITIVE_NUMBER,
        });
    }

    out
}

pub fn validate_section(section: &Section) -> Vec<ValidationResult> {
    section.fields.iter().flat_map(validate_field).collect()
}

pub fn section_summary(title: &str) -> String {
    format!("Please complete all fields in the {} section", title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::{FieldKind, FieldSpec};

    fn field(kind: FieldKind, value: &str) -> Field {
        Field {
            spec: FieldSpec {
                name: "f".to_string(),
                label: "F".to_string(),
                kind,
                options: Vec::new(),
                default: None,
            },
            value: value.to_string(),
        }
    }

    #[test]
    fn empty_text_field_is_required() {
        let r = validate_field(&field(FieldKind::Text, ""));
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].message, MSG_REQUIRED);
    }

    #[test]
    fn filled_text_field_passes() {
        assert!(validate_field(&field(FieldKind::Text, "Pune")).is_empty());
    }

    #[test]
    fn negative_number_fails_positive_number_check() {
        let r = validate_field(&field(FieldKind::Number, "-5"));
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].message, MSG_POSITIVE_NUMBER);
    }

    #[test]
    fn positive_number_passes() {
        assert!(validate_field(&field(FieldKind::Number, "5")).is_empty());
        assert!(validate_field(&field(FieldKind::Float, "1250.75")).is_empty());
    }

    #[test]
    fn non_numeric_float_fails() {
        let r = validate_field(&field(FieldKind::Float, "lots"));
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].message, MSG_POSITIVE_NUMBER);
    }

    #[test]
    fn empty_numeric_field_fails_both_checks() {
        let r = validate_field(&field(FieldKind::Number, ""));
        let messages: Vec<_> = r.iter().map(|v| v.message).collect();
        assert_eq!(messages, vec![MSG_REQUIRED, MSG_POSITIVE_NUMBER]);
    }

    #[test]
    fn summary_names_section() {
        assert_eq!(
            section_summary("Food & Diet"),
            "Please complete all fields in the Food & Diet section"
        );
    }
}
