use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api::{ApiError, FieldsService},
    domain::{SelectField, parse_flag},
};

use super::{
    choices::{ChoiceError, ChoiceLimits, ChoiceListEditor, PasteOutcome},
    field::{FieldId, handle_text_edit, single_line},
    state::FormState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Ignored,
    Edited,
    Rejected(ChoiceError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(SelectField),
    Invalid,
    Unchanged,
    InFlight,
}

/// Edits one record: label, required flag, default value, choices and the
/// sort-order flag.
#[derive(Debug, Clone)]
pub struct RecordEditor {
    form: FormState,
    choices: ChoiceListEditor,
    focus: FieldId,
    record_id: Option<String>,
    load_error: Option<String>,
    saving: bool,
}

impl RecordEditor {
    pub fn new(limits: ChoiceLimits) -> Self {
        Self {
            form: FormState::new(limits, true),
            choices: ChoiceListEditor::new(limits).required(true),
            focus: FieldId::Label,
            record_id: None,
            load_error: None,
            saving: false,
        }
    }

    pub fn keep_rejected_input(mut self, keep: bool) -> Self {
        self.choices = self.choices.keep_rejected_input(keep);
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn choice_editor(&self) -> &ChoiceListEditor {
        &self.choices
    }

    pub fn focus(&self) -> FieldId {
        self.focus
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Loads the remote record for `id`, or the local draft when there is no id.
    pub fn load(&mut self, id: Option<&str>, service: &mut FieldsService) {
        self.choices.reset();
        self.load_error = None;
        match id {
            Some(id) => match service.get_by_id(id) {
                Ok(record) => {
                    debug!(id, "loaded record");
                    self.record_id = Some(id.to_string());
                    self.form.reset(record);
                }
                Err(err) => {
                    warn!(id, error = %err, "failed to load record");
                    self.load_error = Some(err.to_string());
                    self.record_id = None;
                    service.set_active_id(None);
                    self.form.reset(SelectField::default());
                }
            },
            None => {
                let draft = service.drafts().read();
                if draft.is_error {
                    warn!("ignoring unreadable draft");
                }
                self.record_id = None;
                self.form.reset(draft.data.unwrap_or_default());
            }
        }
    }

    pub fn focus_field(&mut self, field: FieldId, service: &mut FieldsService) -> EditOutcome {
        if field == self.focus {
            return EditOutcome::Ignored;
        }
        let outcome = self.blur(service);
        self.focus = field;
        outcome
    }

    /// Focus leaving the current field. Pending choice text is committed.
    pub fn blur(&mut self, service: &mut FieldsService) -> EditOutcome {
        if self.focus != FieldId::Choices {
            return EditOutcome::Ignored;
        }
        self.choices.clear_selection();
        self.commit_choice(service)
    }

    pub fn focus_step(&mut self, delta: i32, service: &mut FieldsService) -> EditOutcome {
        let next = self.focus.step(delta);
        self.focus_field(next, service)
    }

    pub fn handle_key(&mut self, key: &KeyEvent, service: &mut FieldsService) -> EditOutcome {
        match self.focus {
            FieldId::Label | FieldId::Default => {
                let field = self.focus;
                let edited = self
                    .form
                    .text_mut(field)
                    .map(|buffer| handle_text_edit(buffer, key))
                    .unwrap_or(false);
                if edited {
                    self.after_change(field, service);
                    EditOutcome::Edited
                } else {
                    EditOutcome::Ignored
                }
            }
            FieldId::Required => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                    self.toggle_required(service);
                    EditOutcome::Edited
                }
                _ => EditOutcome::Ignored,
            },
            FieldId::Choices => self.handle_choice_key(key, service),
            FieldId::DisplayAlpha => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    let next = if self.form.values().display_alpha {
                        "false"
                    } else {
                        "true"
                    };
                    self.select_display_alpha(next, service);
                    EditOutcome::Edited
                }
                _ => EditOutcome::Ignored,
            },
        }
    }

    fn handle_choice_key(&mut self, key: &KeyEvent, service: &mut FieldsService) -> EditOutcome {
        match key.code {
            KeyCode::Enter => self.commit_choice(service),
            KeyCode::Backspace => {
                if self.choices.backspace(&mut self.form) {
                    self.after_change(FieldId::Choices, service);
                    EditOutcome::Edited
                } else {
                    EditOutcome::Ignored
                }
            }
            KeyCode::Delete => self.remove_selected_choice(service),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.choices.insert_char(&mut self.form, ch);
                EditOutcome::Ignored
            }
            _ => EditOutcome::Ignored,
        }
    }

    fn commit_choice(&mut self, service: &mut FieldsService) -> EditOutcome {
        match self.choices.commit_pending(&mut self.form) {
            Ok(true) => {
                self.after_change(FieldId::Choices, service);
                EditOutcome::Edited
            }
            Ok(false) => EditOutcome::Ignored,
            Err(err) => EditOutcome::Rejected(err),
        }
    }

    pub fn paste(&mut self, raw: &str, service: &mut FieldsService) -> EditOutcome {
        match self.focus {
            FieldId::Choices => match self.choices.bulk_paste(&mut self.form, raw) {
                PasteOutcome::Intercepted { added: 0 } => EditOutcome::Ignored,
                PasteOutcome::Intercepted { .. } => {
                    self.after_change(FieldId::Choices, service);
                    EditOutcome::Edited
                }
                PasteOutcome::PassedThrough => EditOutcome::Ignored,
            },
            field if field.is_text() => {
                let text = single_line(raw);
                if text.is_empty() {
                    return EditOutcome::Ignored;
                }
                if let Some(buffer) = self.form.text_mut(field) {
                    buffer.push_str(&text);
                }
                self.after_change(field, service);
                EditOutcome::Edited
            }
            _ => EditOutcome::Ignored,
        }
    }

    pub fn toggle_required(&mut self, service: &mut FieldsService) {
        let next = !self.form.values().required;
        self.form.set_required(next);
        self.after_change(FieldId::Required, service);
    }

    /// Applies a select option value; anything that is not a boolean keeps the
    /// current flag.
    pub fn select_display_alpha(&mut self, raw: &str, service: &mut FieldsService) {
        let prior = self.form.values().display_alpha;
        let next = parse_flag(&Value::String(raw.to_string()), prior);
        self.form.set_display_alpha(next);
        self.after_change(FieldId::DisplayAlpha, service);
    }

    pub fn select_choice_row(&mut self, delta: i32) -> bool {
        self.choices.select_row(&self.form, delta)
    }

    pub fn remove_selected_choice(&mut self, service: &mut FieldsService) -> EditOutcome {
        if self.choices.remove_selected(&mut self.form).is_some() {
            self.after_change(FieldId::Choices, service);
            EditOutcome::Edited
        } else {
            EditOutcome::Ignored
        }
    }

    /// Validates and saves. The default value joins the choices before the
    /// record is sent.
    pub fn submit(&mut self, service: &mut FieldsService) -> Result<SubmitOutcome, ApiError> {
        if self.saving {
            return Ok(SubmitOutcome::InFlight);
        }
        if !self.form.is_dirty() {
            return Ok(SubmitOutcome::Unchanged);
        }
        if !self.form.validate() {
            return Ok(SubmitOutcome::Invalid);
        }

        let mut record = self.form.values().clone();
        record.reconcile_default();

        self.saving = true;
        let mut confirmed = None;
        let result = service.save(&record, |id| confirmed = Some(id.to_string()));
        self.saving = false;
        result?;

        record.id = confirmed.or(record.id);
        self.record_id = record.id.clone();
        self.choices.reset();
        self.form.reset(record.clone());
        Ok(SubmitOutcome::Saved(record))
    }

    /// Existing records return to their loaded values; a new record drops its
    /// draft and starts over.
    pub fn cancel(&mut self, service: &mut FieldsService) {
        self.choices.reset();
        if self.record_id.is_some() {
            let loaded = self.form.loaded().clone();
            self.form.reset(loaded);
        } else {
            service.clear_draft();
            self.form.reset(SelectField::default());
        }
    }

    /// Choice edits manage their own error; the whole-list check runs on
    /// submit and when the default value it depends on changes.
    fn after_change(&mut self, field: FieldId, service: &mut FieldsService) {
        match field {
            FieldId::Choices => {}
            FieldId::Default => {
                self.form.validate_field(FieldId::Default);
                self.form.validate_field(FieldId::Choices);
            }
            field => self.form.validate_field(field),
        }
        if self.form.values().id.is_none() {
            let values = self.form.values().clone();
            if let Err(err) = service.drafts_mut().write(&values) {
                warn!(error = %err, "failed to write draft");
            }
        }
    }
}
