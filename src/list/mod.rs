//! The saved-records pane.

use tracing::warn;

use crate::{
    api::{ApiError, FieldsService, QueryKey},
    domain::SelectField,
};

pub const FETCH_ERROR: &str = "Error while fetching saved fields";
pub const EMPTY_MESSAGE: &str = "No Select fields available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Failed(String),
    Loaded(Vec<SelectField>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Records(&'a [SelectField]),
}

#[derive(Debug, Clone)]
pub struct RecordList {
    state: ListState,
    cursor: usize,
    active_id: Option<String>,
}

impl Default for RecordList {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordList {
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
            cursor: 0,
            active_id: None,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn view(&self) -> ListView<'_> {
        match &self.state {
            ListState::Loading => ListView::Loading,
            ListState::Failed(_) => ListView::Failed(FETCH_ERROR),
            ListState::Loaded(records) if records.is_empty() => ListView::Empty,
            ListState::Loaded(records) => ListView::Records(records),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    fn records(&self) -> &[SelectField] {
        match &self.state {
            ListState::Loaded(records) => records,
            _ => &[],
        }
    }

    pub fn refresh(&mut self, service: &mut FieldsService) {
        self.state = match service.list() {
            Ok(records) => ListState::Loaded(records),
            Err(err) => {
                warn!(error = %err, "failed to fetch records");
                ListState::Failed(err.to_string())
            }
        };
        let len = self.records().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Drops the cached list before fetching again.
    pub fn reload(&mut self, service: &mut FieldsService) {
        service.invalidate(&QueryKey::List);
        self.state = ListState::Loading;
        self.refresh(service);
    }

    pub fn move_cursor(&mut self, delta: i32) -> bool {
        let len = self.records().len();
        if len == 0 {
            return false;
        }
        let next = (self.cursor as i64 + delta as i64).clamp(0, len as i64 - 1) as usize;
        let changed = next != self.cursor;
        self.cursor = next;
        changed
    }

    /// Records without an id are display-only and cannot be selected.
    pub fn select(&mut self, index: usize, service: &mut FieldsService) -> Option<String> {
        let id = self.records().get(index)?.id.clone()?;
        self.cursor = index;
        service.set_active_id(Some(&id));
        service.clear_draft();
        self.active_id = Some(id.clone());
        Some(id)
    }

    pub fn select_cursor(&mut self, service: &mut FieldsService) -> Option<String> {
        self.select(self.cursor, service)
    }

    pub fn start_new(&mut self, service: &mut FieldsService) {
        service.set_active_id(None);
        service.clear_draft();
        self.active_id = None;
    }

    /// Adopts the navigation `formId` when it differs from the active id.
    pub fn sync_from_navigation(&mut self, service: &FieldsService) -> bool {
        let id = service.active_id();
        if id == self.active_id {
            return false;
        }
        if let Some(index) = id
            .as_deref()
            .and_then(|id| self.records().iter().position(|r| r.id.as_deref() == Some(id)))
        {
            self.cursor = index;
        }
        self.active_id = id;
        true
    }

    /// Deletes the record under the cursor. Returns the deleted id; deleting the
    /// active record also starts a new one.
    pub fn delete_cursor(&mut self, service: &mut FieldsService) -> Result<Option<String>, ApiError> {
        let Some(id) = self
            .records()
            .get(self.cursor)
            .and_then(|record| record.id.clone())
        else {
            return Ok(None);
        };
        service.delete_by_id(&id)?;
        if self.active_id.as_deref() == Some(id.as_str()) {
            self.start_new(service);
        }
        self.refresh(service);
        Ok(Some(id))
    }
}
