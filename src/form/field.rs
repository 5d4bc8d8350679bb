use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Label,
    Required,
    Default,
    Choices,
    DisplayAlpha,
}

impl FieldId {
    pub const ORDER: [FieldId; 5] = [
        FieldId::Label,
        FieldId::Required,
        FieldId::Default,
        FieldId::Choices,
        FieldId::DisplayAlpha,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FieldId::Label => "Label",
            FieldId::Required => "Type",
            FieldId::Default => "Default Value",
            FieldId::Choices => "Choices",
            FieldId::DisplayAlpha => "displayAlpha",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, FieldId::Label | FieldId::Default)
    }

    pub fn step(self, delta: i32) -> FieldId {
        let len = Self::ORDER.len() as i32;
        let index = Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as i32;
        Self::ORDER[(index + delta).rem_euclid(len) as usize]
    }
}

/// Options offered by the sort-order select, as (value, label) pairs.
pub const DISPLAY_ALPHA_OPTIONS: [(&str, &str); 2] = [
    ("false", "Do not sort"),
    ("true", "Display choices in alphabetical order a-z"),
];

pub const REQUIRED_OFF_LABEL: &str = "Multi-select";
pub const REQUIRED_ON_LABEL: &str = "A Value is required";

pub(crate) fn handle_text_edit(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            if buffer.is_empty() {
                return false;
            }
            buffer.clear();
            true
        }
        _ => false,
    }
}

/// Pasted text for a single-line input: line breaks dropped.
pub(crate) fn single_line(raw: &str) -> String {
    raw.chars().filter(|ch| *ch != '\r' && *ch != '\n').collect()
}
