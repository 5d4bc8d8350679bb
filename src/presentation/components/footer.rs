use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::super::view::UiContext;

const SEPARATOR: &str = " • ";

/// Key help on top, then the status row: message, save/dirty markers, the
/// navigation location and an error badge.
pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    if let Some(help) = ctx.help {
        let help = Paragraph::new(help)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(help, rows[0]);
    }

    let form = ctx.editor.form();
    let message_style = if ctx.status_failed {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled(ctx.status_message.to_string(), message_style)];
    if ctx.editor.is_saving() {
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::styled("saving…", Style::default().fg(Color::Cyan)));
    }
    if form.is_dirty() {
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::styled(
            "unsaved changes",
            Style::default().fg(Color::Magenta),
        ));
    }
    if !ctx.location.is_empty() {
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::styled(
            ctx.location.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::raw(" "));
    spans.push(match form.error_count() {
        0 => Span::styled("[ok]", Style::default().fg(Color::Green)),
        count => Span::styled(
            format!("[! {count}]"),
            Style::default().fg(Color::Red).bg(Color::Black),
        ),
    });

    frame.render_widget(
        Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }),
        rows[1],
    );
}
