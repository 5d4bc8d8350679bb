use indexmap::IndexMap;

use crate::domain::SelectField;

use super::{
    choices::{ChoiceHost, ChoiceLimits, validate_choice_list},
    field::FieldId,
};

pub const LABEL_REQUIRED: &str = "Field is required";

/// Host form state: current values, the snapshot they were loaded from and one
/// error slot per field.
#[derive(Debug, Clone)]
pub struct FormState {
    values: SelectField,
    loaded: SelectField,
    errors: IndexMap<FieldId, String>,
    limits: ChoiceLimits,
    choices_required: bool,
}

impl FormState {
    pub fn new(limits: ChoiceLimits, choices_required: bool) -> Self {
        Self {
            values: SelectField::default(),
            loaded: SelectField::default(),
            errors: IndexMap::new(),
            limits,
            choices_required,
        }
    }

    pub fn values(&self) -> &SelectField {
        &self.values
    }

    pub fn loaded(&self) -> &SelectField {
        &self.loaded
    }

    pub fn reset(&mut self, record: SelectField) {
        self.values = record.clone();
        self.loaded = record;
        self.errors.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.loaded
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn set_error(&mut self, field: FieldId, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_error(&mut self, field: FieldId) {
        self.errors.shift_remove(&field);
    }

    pub fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::Label => Some(&mut self.values.label),
            FieldId::Default => Some(&mut self.values.default),
            _ => None,
        }
    }

    pub fn set_required(&mut self, required: bool) {
        self.values.required = required;
    }

    pub fn set_display_alpha(&mut self, display_alpha: bool) {
        self.values.display_alpha = display_alpha;
    }

    /// Runs every field rule against the current values. Returns `is_valid()`.
    pub fn validate(&mut self) -> bool {
        for field in FieldId::ORDER {
            self.validate_field(field);
        }
        self.is_valid()
    }

    pub fn validate_field(&mut self, field: FieldId) {
        let message = match field {
            FieldId::Label if self.values.label.trim().is_empty() => {
                Some(LABEL_REQUIRED.to_string())
            }
            FieldId::Choices => validate_choice_list(
                &self.values.choices,
                &self.values,
                self.limits,
                self.choices_required,
            ),
            _ => None,
        };
        match message {
            Some(message) => self.set_error(field, message),
            None => self.clear_error(field),
        }
    }
}

impl ChoiceHost for FormState {
    fn choices(&self) -> &[String] {
        &self.values.choices
    }

    fn set_choices(&mut self, choices: Vec<String>) {
        self.values.choices = choices;
    }

    fn set_choices_error(&mut self, message: String) {
        self.set_error(FieldId::Choices, message);
    }

    fn clear_choices_error(&mut self) {
        self.clear_error(FieldId::Choices);
    }
}
