// Form definition + runtime form model
//
// A definition is the static layout (sections, fields, select options) loaded from TOML.
// `Form` is the runtime copy that carries the user's current answers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::validation::validate_field_name;

const BUILTIN_FORM: &str = include_str!("../../forms/carbon_footprint.toml");

#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to read form definition {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse form definition: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("form definition has no sections")]
    NoSections,
    #[error("section {index} has an empty title")]
    EmptyTitle { index: usize },
    #[error("section '{title}' has no fields")]
    EmptySection { title: String },
    #[error("invalid field name '{name}': {reason}")]
    InvalidFieldName { name: String, reason: String },
    #[error("field '{0}' is defined more than once")]
    DuplicateField(String),
    #[error("select field '{0}' has no options")]
    SelectWithoutOptions(String),
    #[error("field '{0}' lists options but is not a select field")]
    OptionsOnNonSelect(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Float,
    Select,
}

impl FieldKind {
    /// Numeric fields get the extra "valid positive number" check.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Float)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Float => "float",
            FieldKind::Select => "select",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefinition {
    #[serde(default = "default_form_title")]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

fn default_form_title() -> String {
    "Carbon Footprint Calculator".to_string()
}

impl FormDefinition {
    /// The carbon footprint questionnaire shipped with the binary.
    pub fn builtin() -> Result<Self, FormError> {
        Self::from_toml_str(BUILTIN_FORM)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, FormError> {
        let def: FormDefinition = toml::from_str(raw)?;
        def.validate()?;
        Ok(def)
    }

    pub fn load(path: &Path) -> Result<Self, FormError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.sections.is_empty() {
            return Err(FormError::NoSections);
        }

        let mut seen = HashSet::new();
        for (index, section) in self.sections.iter().enumerate() {
            if section.title.trim().is_empty() {
                return Err(FormError::EmptyTitle { index });
            }
            if section.fields.is_empty() {
                return Err(FormError::EmptySection {
                    title: section.title.clone(),
                });
            }

            for field in &section.fields {
                validate_field_name(&field.name).map_err(|e| FormError::InvalidFieldName {
                    name: field.name.clone(),
                    reason: e.to_string(),
                })?;
                if !seen.insert(field.name.as_str()) {
                    return Err(FormError::DuplicateField(field.name.clone()));
                }
                match field.kind {
                    FieldKind::Select if field.options.is_empty() => {
                        return Err(FormError::SelectWithoutOptions(field.name.clone()));
                    }
                    FieldKind::Select => {}
                    _ if !field.options.is_empty() => {
                        return Err(FormError::OptionsOnNonSelect(field.name.clone()));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }
}

/// A single input/select control with its current answer.
#[derive(Debug, Clone)]
pub struct Field {
    pub spec: FieldSpec,
    pub value: String,
}

impl Field {
    fn from_spec(spec: FieldSpec) -> Self {
        // A rendered <select> always has its first option chosen.
        let value = match (&spec.default, spec.kind) {
            (Some(d), _) => d.clone(),
            (None, FieldKind::Select) => spec
                .options
                .first()
                .map(|o| o.value.clone())
                .unwrap_or_default(),
            (None, _) => String::new(),
        };
        Self { spec, value }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn kind(&self) -> FieldKind {
        self.spec.kind
    }

    /// Label of the selected option (select fields), otherwise the raw value.
    pub fn display_value(&self) -> &str {
        if self.spec.kind == FieldKind::Select {
            if let Some(opt) = self.spec.options.iter().find(|o| o.value == self.value) {
                return &opt.label;
            }
        }
        &self.value
    }

    /// Move the selection of a select field by `step` (wrapping). No-op for other kinds.
    pub fn cycle_option(&mut self, step: isize) {
        if self.spec.kind != FieldKind::Select || self.spec.options.is_empty() {
            return;
        }
        let len = self.spec.options.len() as isize;
        let current = self
            .spec
            .options
            .iter()
            .position(|o| o.value == self.value)
            .map(|i| i as isize)
            .unwrap_or(0);
        let next = (current + step).rem_euclid(len) as usize;
        self.value = self.spec.options[next].value.clone();
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone)]
pub struct Form {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Form {
    pub fn from_definition(def: FormDefinition) -> Self {
        let sections = def
            .sections
            .into_iter()
            .map(|s| Section {
                title: s.title,
                fields: s.fields.into_iter().map(Field::from_spec).collect(),
            })
            .collect();
        Self {
            title: def.title,
            sections,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.fields.iter_mut())
            .find(|f| f.name() == name)
    }

    /// Flat name -> value map of every field, in name order.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|f| (f.name().to_string(), f.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_form_parses_and_validates() {
        let def = FormDefinition::builtin().expect("builtin form should be valid");
        assert_eq!(def.title, "Carbon Footprint Calculator");
        assert_eq!(def.sections.len(), 7);
        assert_eq!(def.sections[0].title, "Basic Info");
        assert_eq!(def.field_count(), 27);
    }

    #[test]
    fn builtin_form_initial_values() {
        let form = Form::from_definition(FormDefinition::builtin().unwrap());
        assert_eq!(form.field("name").unwrap().value, "");
        assert_eq!(form.field("domestic_flights").unwrap().value, "0");
        assert_eq!(form.field("renewable_energy").unwrap().value, "no");
        assert_eq!(form.field("cooking_fuel").unwrap().display_value(), "LPG");
    }

    #[test]
    fn rejects_empty_definition() {
        let err = FormDefinition::from_toml_str("title = \"x\"").unwrap_err();
        assert!(matches!(err, FormError::NoSections));
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let raw = r#"
            [[sections]]
            title = "A"
            [[sections.fields]]
            name = "age"
            label = "Age"
            kind = "number"

            [[sections]]
            title = "B"
            [[sections.fields]]
            name = "age"
            label = "Age again"
            kind = "text"
        "#;
        let err = FormDefinition::from_toml_str(raw).unwrap_err();
        assert!(matches!(err, FormError::DuplicateField(ref n) if n == "age"));
    }

    #[test]
    fn rejects_bad_field_name() {
        let raw = r#"
            [[sections]]
            title = "A"
            [[sections.fields]]
            name = "daily travel"
            label = "Daily travel"
            kind = "float"
        "#;
        let err = FormDefinition::from_toml_str(raw).unwrap_err();
        assert!(matches!(err, FormError::InvalidFieldName { .. }));
    }

    #[test]
    fn rejects_select_without_options_and_options_on_text() {
        let raw = r#"
            [[sections]]
            title = "A"
            [[sections.fields]]
            name = "diet"
            label = "Diet"
            kind = "select"
        "#;
        assert!(matches!(
            FormDefinition::from_toml_str(raw).unwrap_err(),
            FormError::SelectWithoutOptions(_)
        ));

        let raw = r#"
            [[sections]]
            title = "A"
            [[sections.fields]]
            name = "diet"
            label = "Diet"
            kind = "text"
            options = [{ value = "v", label = "V" }]
        "#;
        assert!(matches!(
            FormDefinition::from_toml_str(raw).unwrap_err(),
            FormError::OptionsOnNonSelect(_)
        ));
    }

    #[test]
    fn rejects_empty_section_and_unknown_kind() {
        let raw = r#"
            [[sections]]
            title = "Lonely"
        "#;
        assert!(matches!(
            FormDefinition::from_toml_str(raw).unwrap_err(),
            FormError::EmptySection { .. }
        ));

        let raw = r#"
            [[sections]]
            title = "A"
            [[sections.fields]]
            name = "x"
            label = "X"
            kind = "checkbox"
        "#;
        assert!(matches!(
            FormDefinition::from_toml_str(raw).unwrap_err(),
            FormError::Parse(_)
        ));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("form.toml");
        std::fs::write(
            &path,
            "[[sections]]\ntitle = \"Only\"\n[[sections.fields]]\nname = \"n\"\nlabel = \"N\"\nkind = \"text\"\n",
        )
        .unwrap();

        let def = FormDefinition::load(&path).unwrap();
        assert_eq!(def.sections.len(), 1);
        assert_eq!(def.title, "Carbon Footprint Calculator");

        let missing = FormDefinition::load(&tmp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, FormError::Io { .. }));
    }

    #[test]
    fn cycle_option_wraps_both_directions() {
        let mut form = Form::from_definition(FormDefinition::builtin().unwrap());
        let field = form.field_mut("renewable_energy").unwrap();
        field.cycle_option(1);
        assert_eq!(field.value, "yes");
        field.cycle_option(1);
        assert_eq!(field.value, "no");
        field.cycle_option(-1);
        assert_eq!(field.value, "yes");

        let text = form.field_mut("name").unwrap();
        text.cycle_option(1);
        assert_eq!(text.value, "");
    }
}
