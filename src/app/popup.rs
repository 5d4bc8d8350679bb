use crate::{form::DISPLAY_ALPHA_OPTIONS, presentation::PopupRender};

/// The sort-order select, opened over the editor.
pub(crate) struct PopupState {
    title: String,
    values: Vec<&'static str>,
    labels: Vec<String>,
    current: usize,
    selected: usize,
}

impl PopupState {
    pub(crate) fn display_alpha(stored: bool) -> Self {
        let stored = if stored { "true" } else { "false" };
        let current = DISPLAY_ALPHA_OPTIONS
            .iter()
            .position(|(value, _)| *value == stored)
            .unwrap_or(0);
        Self {
            title: "displayAlpha".to_string(),
            values: DISPLAY_ALPHA_OPTIONS.iter().map(|(value, _)| *value).collect(),
            labels: DISPLAY_ALPHA_OPTIONS
                .iter()
                .map(|(_, label)| label.to_string())
                .collect(),
            current,
            selected: current,
        }
    }

    pub(crate) fn select_previous(&mut self) {
        if self.labels.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.labels.len().saturating_sub(1);
        } else {
            self.selected -= 1;
        }
    }

    pub(crate) fn select_next(&mut self) {
        if self.labels.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.labels.len();
    }

    pub(crate) fn selected_value(&self) -> Option<&'static str> {
        self.values.get(self.selected).copied()
    }

    pub(crate) fn as_render(&self) -> PopupRender<'_> {
        PopupRender {
            title: &self.title,
            options: &self.labels,
            current: self.current,
            selected: self.selected,
        }
    }
}
