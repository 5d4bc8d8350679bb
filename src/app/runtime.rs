use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::{
    api::FieldsService,
    form::{EditOutcome, FieldId, RecordEditor, SubmitOutcome},
    list::RecordList,
    presentation::{self, UiContext},
};

use super::{
    keymap::{KeyCommand, Pane, classify, help_text},
    options::UiOptions,
    popup::PopupState,
    status::StatusLine,
    terminal::TerminalSession,
};

pub(crate) struct App {
    service: FieldsService,
    list: RecordList,
    editor: RecordEditor,
    options: UiOptions,
    status: StatusLine,
    pane: Pane,
    popup: Option<PopupState>,
    exit_armed: bool,
    should_quit: bool,
}

impl App {
    pub fn new(service: FieldsService, options: UiOptions) -> Self {
        let editor =
            RecordEditor::new(options.limits).keep_rejected_input(options.keep_rejected_input);
        Self {
            service,
            list: RecordList::new(),
            editor,
            options,
            status: StatusLine::new(),
            pane: Pane::Editor,
            popup: None,
            exit_armed: false,
            should_quit: false,
        }
    }

    /// Fetches the list and loads whichever record the navigation points at.
    pub fn bootstrap(&mut self) {
        self.list.refresh(&mut self.service);
        self.list.sync_from_navigation(&self.service);
        let active = self.list.active_id().map(str::to_string);
        self.open_record(active.as_deref());
    }

    /// Runs until the user quits and returns the final navigation location.
    pub fn run(mut self) -> Result<String> {
        let mut terminal = TerminalSession::enter()?;
        terminal.draw(|frame| self.draw(frame))?;
        self.bootstrap();
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Paste(text) => self.handle_paste(&text),
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::FocusLost => self.handle_blur(),
                Event::Mouse(_) | Event::FocusGained => {}
            }
        }
        Ok(self.service.navigation().render())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        presentation::draw(
            frame,
            UiContext {
                list: &self.list,
                editor: &self.editor,
                list_focused: self.pane == Pane::List,
                status_message: self.status.message(),
                status_failed: self.status.is_failure(),
                help: self.options.show_help.then(|| help_text(self.pane)),
                location: self.service.navigation().render(),
                popup: self.popup.as_ref().map(PopupState::as_render),
            },
        );
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.handle_popup_key(&key) {
            return;
        }

        let command = classify(&key, self.pane);
        if !matches!(command, KeyCommand::Quit) {
            self.exit_armed = false;
        }
        match command {
            KeyCommand::Save => self.on_save(),
            KeyCommand::Quit => self.on_exit(),
            KeyCommand::Cancel => self.on_cancel(),
            KeyCommand::NewForm => self.on_new_form(),
            KeyCommand::ResetStatus => self.status.ready(),
            KeyCommand::FocusList => {
                self.handle_blur();
                self.pane = Pane::List;
            }
            KeyCommand::FocusEditor => self.pane = Pane::Editor,
            KeyCommand::FieldStep(delta) => {
                let outcome = self.editor.focus_step(delta, &mut self.service);
                self.report(outcome);
            }
            KeyCommand::RowSelect(delta) => {
                if self.editor.focus() == FieldId::Choices {
                    self.editor.select_choice_row(delta);
                }
            }
            KeyCommand::ListMove(delta) => {
                self.list.move_cursor(delta);
            }
            KeyCommand::ListOpen => self.on_open_selected(),
            KeyCommand::ListDelete => self.on_delete(),
            KeyCommand::ListReload => self.list.reload(&mut self.service),
            KeyCommand::Activate if self.editor.focus() == FieldId::DisplayAlpha => {
                self.popup = Some(PopupState::display_alpha(
                    self.editor.form().values().display_alpha,
                ));
                self.status.set_raw("Use ↑/↓ and Enter to choose");
            }
            KeyCommand::Activate => {
                let outcome = self.editor.handle_key(
                    &KeyEvent::from(KeyCode::Enter),
                    &mut self.service,
                );
                self.report(outcome);
            }
            KeyCommand::Edit(event) => {
                let outcome = self.editor.handle_key(&event, &mut self.service);
                self.report(outcome);
            }
            KeyCommand::None => {}
        }
    }

    fn handle_popup_key(&mut self, key: &KeyEvent) -> bool {
        let Some(popup) = &mut self.popup else {
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.popup = None;
                self.status.ready();
            }
            KeyCode::Up => popup.select_previous(),
            KeyCode::Down => popup.select_next(),
            KeyCode::Enter => {
                let value = popup.selected_value();
                self.popup = None;
                if let Some(value) = value {
                    self.editor.select_display_alpha(value, &mut self.service);
                    self.status.editing(FieldId::DisplayAlpha.title());
                }
            }
            _ => {}
        }
        true
    }

    fn handle_paste(&mut self, text: &str) {
        if self.pane != Pane::Editor || self.popup.is_some() {
            return;
        }
        let outcome = self.editor.paste(text, &mut self.service);
        self.report(outcome);
    }

    /// Losing focus commits any pending choice text.
    fn handle_blur(&mut self) {
        let outcome = self.editor.blur(&mut self.service);
        self.report(outcome);
    }

    fn report(&mut self, outcome: EditOutcome) {
        match outcome {
            EditOutcome::Edited => self.status.editing(self.editor.focus().title()),
            EditOutcome::Rejected(err) => self.status.set_raw(err.to_string()),
            EditOutcome::Ignored => {}
        }
    }

    fn open_record(&mut self, id: Option<&str>) {
        self.editor.load(id, &mut self.service);
        match self.editor.load_error() {
            Some(message) => {
                self.status.request_failed("Loading field", &message);
                self.list.sync_from_navigation(&self.service);
            }
            None => self.status.ready(),
        }
    }

    fn on_open_selected(&mut self) {
        if let Some(id) = self.list.select_cursor(&mut self.service) {
            debug!(id, "opening record");
            self.open_record(Some(&id));
            self.pane = Pane::Editor;
        }
    }

    fn on_new_form(&mut self) {
        self.list.start_new(&mut self.service);
        self.open_record(None);
        self.pane = Pane::Editor;
        self.status.set_raw("New form");
    }

    fn on_cancel(&mut self) {
        self.editor.cancel(&mut self.service);
        self.status.set_raw("Changes discarded");
    }

    fn on_delete(&mut self) {
        match self.list.delete_cursor(&mut self.service) {
            Ok(Some(id)) => {
                if self.editor.record_id() == Some(id.as_str()) {
                    self.open_record(None);
                }
                self.status.set_raw(format!("Deleted field {id}"));
            }
            Ok(None) => {}
            Err(err) => self.status.request_failed("Delete", &err),
        }
    }

    fn on_save(&mut self) {
        match self.editor.submit(&mut self.service) {
            Ok(SubmitOutcome::Saved(record)) => {
                info!(id = ?record.id, "saved from editor");
                self.status.saved(record.id.as_deref());
                self.list.refresh(&mut self.service);
                self.list.sync_from_navigation(&self.service);
            }
            Ok(SubmitOutcome::Invalid) => {
                self.status
                    .issues_remaining(self.editor.form().error_count());
            }
            Ok(SubmitOutcome::Unchanged) => self.status.set_raw("No changes to save"),
            Ok(SubmitOutcome::InFlight) => self.status.set_raw("Save already in progress"),
            Err(err) => self.status.request_failed("Save", &err),
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.editor.form().is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}

#[cfg(test)]
impl App {
    pub(crate) fn handle_key_for_test(&mut self, key: KeyEvent) {
        self.handle_key(key)
    }

    pub(crate) fn handle_paste_for_test(&mut self, text: &str) {
        self.handle_paste(text)
    }

    pub(crate) fn editor(&self) -> &RecordEditor {
        &self.editor
    }

    pub(crate) fn list(&self) -> &RecordList {
        &self.list
    }

    pub(crate) fn service(&self) -> &FieldsService {
        &self.service
    }

    pub(crate) fn status_message(&self) -> &str {
        self.status.message()
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn draw_for_test(&self, frame: &mut ratatui::Frame<'_>) {
        self.draw(frame)
    }
}
