use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{form::RecordEditor, list::RecordList};

use super::components::{render_editor, render_footer, render_popup, render_record_list};

pub struct UiContext<'a> {
    pub list: &'a RecordList,
    pub editor: &'a RecordEditor,
    pub list_focused: bool,
    pub status_message: &'a str,
    pub status_failed: bool,
    pub help: Option<&'a str>,
    pub location: String,
    pub popup: Option<PopupRender<'a>>,
}

/// A single-choice select drawn over the editor. `current` is the stored
/// value, `selected` the highlighted row.
pub struct PopupRender<'a> {
    pub title: &'a str,
    pub options: &'a [String],
    pub current: usize,
    pub selected: usize,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(4)])
        .split(frame.area());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[0]);

    let cursor_enabled = !ctx.list_focused && ctx.popup.is_none();
    render_record_list(frame, panes[0], ctx.list, ctx.list_focused);
    render_editor(frame, panes[1], ctx.editor, cursor_enabled);
    render_footer(frame, chunks[1], &ctx);

    if let Some(popup) = ctx.popup {
        render_popup(frame, popup);
    }
}
