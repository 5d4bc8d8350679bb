use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::form::ChoiceListEditor;

pub(super) const CHOICE_HINT: &str =
    "Enter or leave to add • Backspace removes last • paste lines to bulk add";
pub(super) const PLACEHOLDER: &str = "Type here";

/// One line per committed entry: the part within the length limit as-is, the
/// remainder marked as overflow.
pub(super) fn choice_lines(
    editor: &ChoiceListEditor,
    choices: &[String],
    focused: bool,
) -> Vec<Line<'static>> {
    let overflow_style = Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::UNDERLINED);
    editor
        .rows(choices)
        .into_iter()
        .map(|row| {
            let marker = if row.selected && focused {
                Span::styled("  ✕ ", Style::default().fg(Color::Red))
            } else {
                Span::raw("  • ")
            };
            let within_style = if row.selected && focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let mut spans = vec![marker, Span::styled(row.within, within_style)];
            if !row.overflow.is_empty() {
                spans.push(Span::styled(row.overflow, overflow_style));
            }
            Line::from(spans)
        })
        .collect()
}

pub(super) fn input_line(editor: &ChoiceListEditor) -> Line<'static> {
    if editor.pending().is_empty() {
        Line::from(vec![
            Span::raw("  > "),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![Span::raw("  > "), Span::raw(editor.pending().to_string())])
    }
}

pub(super) fn counter_line(editor: &ChoiceListEditor, len: usize, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("  {}", editor.counter(len)),
        Style::default().fg(Color::Gray),
    )];
    if focused {
        spans.push(Span::styled(
            format!("  {CHOICE_HINT}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
