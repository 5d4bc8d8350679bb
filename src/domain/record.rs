use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::convert::{lenient_choices, lenient_flag, lenient_id, lenient_text};

/// The editable select-field record exchanged with the remote resource and the
/// draft slot.
///
/// Deserialization never fails on shape: missing or mistyped members fall back
/// to their defaults so partially populated payloads still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectField {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub required: bool,
    #[serde(deserialize_with = "lenient_choices")]
    pub choices: Vec<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub display_alpha: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub default: String,
}

impl SelectField {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn has_choice(&self, value: &str) -> bool {
        self.choices.iter().any(|choice| choice == value)
    }

    /// Appends the default value to the choices when it is non-empty and not
    /// already one of them. Returns whether the list changed.
    pub fn reconcile_default(&mut self) -> bool {
        if self.default.is_empty() || self.has_choice(&self.default) {
            return false;
        }
        self.choices.push(self.default.clone());
        true
    }

    pub fn display_order(&self) -> Vec<&str> {
        let mut ordered = self.choices.iter().map(String::as_str).collect::<Vec<_>>();
        if self.display_alpha {
            ordered.sort_by(|left, right| {
                match left.to_lowercase().cmp(&right.to_lowercase()) {
                    Ordering::Equal => left.cmp(right),
                    other => other,
                }
            });
        }
        ordered
    }

    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            "<untitled>"
        } else {
            &self.label
        }
    }
}
