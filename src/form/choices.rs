use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::domain::SelectField;

static PASTE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n,]").expect("valid separator pattern"));

pub const DEFAULT_MAX_CHOICES: usize = 50;
pub const DEFAULT_MAX_CHOICE_LENGTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceLimits {
    pub max_choices: usize,
    pub max_length: usize,
}

impl Default for ChoiceLimits {
    fn default() -> Self {
        Self {
            max_choices: DEFAULT_MAX_CHOICES,
            max_length: DEFAULT_MAX_CHOICE_LENGTH,
        }
    }
}

impl ChoiceLimits {
    pub fn new(max_choices: usize, max_length: usize) -> Self {
        Self {
            max_choices,
            max_length,
        }
    }
}

/// Rejections raised while committing the pending text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("Duplicate Entries Not Allowed")]
    DuplicateEntry,
    #[error("Limit Reached")]
    LimitReached,
}

/// The form side of the widget: the host owns the committed list and its error
/// slot, the editor only owns the pending text.
pub trait ChoiceHost {
    fn choices(&self) -> &[String];
    fn set_choices(&mut self, choices: Vec<String>);
    fn set_choices_error(&mut self, message: String);
    fn clear_choices_error(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The paste was split into entries; `added` counts the new ones.
    Intercepted { added: usize },
    /// Plain text, appended to the pending input.
    PassedThrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRow {
    pub within: String,
    pub overflow: String,
    pub selected: bool,
}

impl ChoiceRow {
    pub fn is_oversized(&self) -> bool {
        !self.overflow.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ChoiceListEditor {
    limits: ChoiceLimits,
    required: bool,
    pending: String,
    keep_rejected_input: bool,
    selected_row: Option<usize>,
}

impl ChoiceListEditor {
    pub fn new(limits: ChoiceLimits) -> Self {
        Self {
            limits,
            required: false,
            pending: String::new(),
            keep_rejected_input: false,
            selected_row: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Keeps the pending text in the input when a commit is rejected instead of
    /// clearing it.
    pub fn keep_rejected_input(mut self, keep: bool) -> Self {
        self.keep_rejected_input = keep;
        self
    }

    pub fn limits(&self) -> ChoiceLimits {
        self.limits
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.selected_row = None;
    }

    pub fn on_text_change(&mut self, host: &mut impl ChoiceHost, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            host.clear_choices_error();
        }
        self.pending = text;
    }

    pub fn insert_char(&mut self, host: &mut impl ChoiceHost, ch: char) {
        let mut text = self.pending.clone();
        text.push(ch);
        self.on_text_change(host, text);
    }

    /// Backspace either edits the pending text or, when it is already empty,
    /// drops the last committed entry. Returns whether the committed list changed.
    pub fn backspace(&mut self, host: &mut impl ChoiceHost) -> bool {
        if self.pending.is_empty() {
            return self.remove_last(host).is_some();
        }
        let mut text = self.pending.clone();
        text.pop();
        self.on_text_change(host, text);
        false
    }

    /// Commits the trimmed pending text. `Ok(true)` means an entry was appended,
    /// `Ok(false)` that there was nothing to commit.
    pub fn commit_pending(&mut self, host: &mut impl ChoiceHost) -> Result<bool, ChoiceError> {
        let trimmed = self.pending.trim().to_string();
        if trimmed.is_empty() {
            if !self.pending.is_empty() {
                host.clear_choices_error();
            }
            self.pending.clear();
            return Ok(false);
        }
        if let Err(err) = self.check_commit(host.choices(), &trimmed) {
            host.set_choices_error(err.to_string());
            if !self.keep_rejected_input {
                self.pending.clear();
            }
            return Err(err);
        }
        let mut next = host.choices().to_vec();
        next.push(trimmed);
        self.update_value(host, next);
        self.pending.clear();
        Ok(true)
    }

    fn check_commit(&self, choices: &[String], candidate: &str) -> Result<(), ChoiceError> {
        if choices.iter().any(|choice| choice == candidate) {
            return Err(ChoiceError::DuplicateEntry);
        }
        if choices.len() >= self.limits.max_choices {
            return Err(ChoiceError::LimitReached);
        }
        Ok(())
    }

    pub fn remove_last(&mut self, host: &mut impl ChoiceHost) -> Option<String> {
        let mut next = host.choices().to_vec();
        let removed = next.pop()?;
        self.update_value(host, next);
        Some(removed)
    }

    pub fn remove_item(&mut self, host: &mut impl ChoiceHost, value: &str) -> bool {
        let before = host.choices().len();
        let next = host
            .choices()
            .iter()
            .filter(|choice| choice.as_str() != value)
            .cloned()
            .collect::<Vec<_>>();
        if next.len() == before {
            return false;
        }
        self.update_value(host, next);
        true
    }

    /// Splits pasted text on newlines and commas into entries. Text without
    /// either separator is treated as ordinary typing.
    pub fn bulk_paste(&mut self, host: &mut impl ChoiceHost, raw: &str) -> PasteOutcome {
        if !PASTE_SEPARATOR.is_match(raw) {
            let mut text = self.pending.clone();
            text.push_str(raw);
            self.on_text_change(host, text);
            return PasteOutcome::PassedThrough;
        }

        let parts = PASTE_SEPARATOR
            .split(raw)
            .map(|part| part.replace(['\r', '\n'], "").trim().to_string())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();
        if parts.is_empty() {
            return PasteOutcome::Intercepted { added: 0 };
        }

        let mut merged = host.choices().iter().cloned().collect::<IndexSet<_>>();
        let before = merged.len();
        merged.extend(parts);
        let added = merged.len() - before;
        self.update_value(host, merged.into_iter().collect());
        self.pending.clear();
        PasteOutcome::Intercepted { added }
    }

    pub fn select_row(&mut self, host: &impl ChoiceHost, delta: i32) -> bool {
        let len = host.choices().len();
        if len == 0 {
            self.selected_row = None;
            return false;
        }
        let next = match self.selected_row {
            None if delta < 0 => len - 1,
            None => 0,
            Some(current) => {
                let shifted = current as i64 + delta as i64;
                shifted.clamp(0, len as i64 - 1) as usize
            }
        };
        let changed = self.selected_row != Some(next);
        self.selected_row = Some(next);
        changed
    }

    pub fn clear_selection(&mut self) {
        self.selected_row = None;
    }

    /// The per-row removal control.
    pub fn remove_selected(&mut self, host: &mut impl ChoiceHost) -> Option<String> {
        let index = self.selected_row?;
        let value = host.choices().get(index)?.clone();
        self.remove_item(host, &value);
        Some(value)
    }

    pub fn validate(&self, list: &[String], snapshot: &SelectField) -> Option<String> {
        validate_choice_list(list, snapshot, self.limits, self.required)
    }

    pub fn rows(&self, list: &[String]) -> Vec<ChoiceRow> {
        list.iter()
            .enumerate()
            .map(|(index, item)| {
                let (within, overflow) = split_at_chars(item, self.limits.max_length);
                ChoiceRow {
                    within: within.to_string(),
                    overflow: overflow.to_string(),
                    selected: self.selected_row == Some(index),
                }
            })
            .collect()
    }

    pub fn counter(&self, len: usize) -> String {
        format!("({}/{})", len, self.limits.max_choices)
    }

    fn update_value(&mut self, host: &mut impl ChoiceHost, next: Vec<String>) {
        let len = next.len();
        host.set_choices(next);
        host.clear_choices_error();
        self.selected_row = match self.selected_row {
            Some(_) if len == 0 => None,
            Some(index) => Some(index.min(len - 1)),
            None => None,
        };
    }
}

/// Whole-list validation run by the host form. Later checks overwrite earlier
/// ones, so at most one message comes back.
pub fn validate_choice_list(
    list: &[String],
    snapshot: &SelectField,
    limits: ChoiceLimits,
    required: bool,
) -> Option<String> {
    let mut message = None;
    if !snapshot.default.is_empty() {
        let default_present = list.iter().any(|choice| *choice == snapshot.default);
        if list.len() >= limits.max_choices && !default_present {
            message = Some(format!(
                "Limit ({}) reached, please remove {} to add the default value",
                limits.max_choices,
                list.len() - limits.max_choices + 1
            ));
        }
    } else if list.is_empty() && required {
        message = Some("At lease one choice or default value is needed".to_string());
    }

    let oversized = list
        .iter()
        .filter(|choice| choice.chars().count() > limits.max_length)
        .count();
    if oversized > 0 {
        message = Some(format!("{oversized} choices are larger that permitted"));
    }
    message
}

fn split_at_chars(text: &str, limit: usize) -> (&str, &str) {
    match text.char_indices().nth(limit) {
        Some((offset, _)) => text.split_at(offset),
        None => (text, ""),
    }
}
