use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};
use unicode_width::UnicodeWidthStr;

use super::super::view::PopupRender;
use super::layout::popup_rect;

const CURRENT_MARK: &str = "● ";
const OTHER_MARK: &str = "○ ";
const POPUP_HINT: &str = "Enter choose • Esc close";

pub fn render_popup(frame: &mut Frame<'_>, popup: PopupRender<'_>) {
    let Some(last) = popup.options.len().checked_sub(1) else {
        return;
    };
    let content_width = popup
        .options
        .iter()
        .map(|option| UnicodeWidthStr::width(option.as_str()) + UnicodeWidthStr::width(CURRENT_MARK))
        .chain([popup.title, POPUP_HINT].map(UnicodeWidthStr::width))
        .max()
        .unwrap_or(10) as u16;
    let screen = frame.area();
    let width = content_width
        .saturating_add(6)
        .min(screen.width.saturating_sub(2).max(1));
    let height = (popup.options.len() as u16).saturating_add(2).max(3);
    let area = popup_rect(screen, width, height);
    frame.render_widget(Clear, area);

    let items = popup
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let (mark, style) = if index == popup.current {
                (CURRENT_MARK, Style::default().fg(Color::Green))
            } else {
                (OTHER_MARK, Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::raw(option.clone()),
            ]))
        })
        .collect::<Vec<_>>();
    let mut state = ListState::default().with_selected(Some(popup.selected.min(last)));

    let list = List::new(items)
        .block(
            Block::default()
                .title(popup.title)
                .title_bottom(POPUP_HINT)
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut state);
}
