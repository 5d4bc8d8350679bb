use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::list::{EMPTY_MESSAGE, ListView, RecordList};

pub fn render_record_list(frame: &mut Frame<'_>, area: Rect, list: &RecordList, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title("Available forms")
        .borders(Borders::ALL)
        .border_style(border);

    let records = match list.view() {
        ListView::Loading => {
            frame.render_widget(Paragraph::new("Loading fields...").block(block), area);
            return;
        }
        ListView::Failed(message) => {
            let widget = Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(widget, area);
            return;
        }
        ListView::Empty => {
            frame.render_widget(Paragraph::new(EMPTY_MESSAGE).block(block), area);
            return;
        }
        ListView::Records(records) => records,
    };

    let items = records
        .iter()
        .map(|record| {
            let active = record.id.is_some() && record.id.as_deref() == list.active_id();
            let style = match (&record.id, active) {
                (None, _) => Style::default().fg(Color::DarkGray),
                (Some(_), true) => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                (Some(_), false) => Style::default(),
            };
            let marker = if active { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(record.display_label().to_string(), style),
            ]))
        })
        .collect::<Vec<_>>();

    let mut state = ListState::default();
    if focused {
        state.select(Some(list.cursor()));
    }
    let widget = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");
    frame.render_stateful_widget(widget, area, &mut state);
}
