use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::form::{
    DISPLAY_ALPHA_OPTIONS, FieldId, REQUIRED_OFF_LABEL, REQUIRED_ON_LABEL, RecordEditor,
};

use super::choices::{choice_lines, counter_line, input_line};

struct CursorHint {
    line: usize,
    column: u16,
}

pub fn render_editor(frame: &mut Frame<'_>, area: Rect, editor: &RecordEditor, enable_cursor: bool) {
    let mut title = match editor.record_id() {
        Some(id) => format!("Field {id}"),
        None => "New field (draft)".to_string(),
    };
    if editor.form().is_dirty() {
        title.push_str(" *");
    }

    let max_width = area.width.saturating_sub(4).max(4) as usize;
    let mut lines = Vec::new();
    let mut cursor = None;
    let mut focus_line = 0usize;

    if let Some(message) = editor.load_error() {
        lines.push(Line::from(Span::styled(
            format!("Failed to load field: {message}"),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::default());
    }

    for field in FieldId::ORDER {
        let focused = editor.focus() == field;
        if focused {
            focus_line = lines.len();
        }
        lines.push(label_line(field, focused));
        let start = lines.len();
        let (body, hint) = value_lines(editor, field, focused, max_width);
        lines.extend(body);
        if let Some(hint) = hint {
            cursor = Some(CursorHint {
                line: start + hint.line,
                column: hint.column,
            });
        }
        if let Some(message) = editor.form().error(field) {
            for segment in wrap(message, max_width) {
                lines.push(Line::from(Span::styled(
                    format!("  {segment}"),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        lines.push(Line::default());
    }

    let inner_height = area.height.saturating_sub(2) as usize;
    let anchor = cursor.as_ref().map(|hint| hint.line).unwrap_or(focus_line);
    let scroll = if inner_height == 0 || anchor < inner_height {
        0
    } else {
        anchor + 1 - inner_height
    };

    let widget = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);

    if enable_cursor && let Some(hint) = cursor {
        let row = hint.line.saturating_sub(scroll);
        if row < inner_height {
            let x = area
                .x
                .saturating_add(1)
                .saturating_add(hint.column)
                .min(area.right().saturating_sub(2));
            let y = area.y.saturating_add(1).saturating_add(row as u16);
            frame.set_cursor_position((x, y));
        }
    }
}

fn label_line(field: FieldId, focused: bool) -> Line<'static> {
    let mut label = field.title().to_string();
    if field == FieldId::Label {
        label.push_str(" *");
    }
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(label, style))
}

fn value_lines(
    editor: &RecordEditor,
    field: FieldId,
    focused: bool,
    max_width: usize,
) -> (Vec<Line<'static>>, Option<CursorHint>) {
    let values = editor.form().values();
    match field {
        FieldId::Label | FieldId::Default => {
            let text = if field == FieldId::Label {
                &values.label
            } else {
                &values.default
            };
            let hint = focused.then(|| CursorHint {
                line: 0,
                column: 2 + UnicodeWidthStr::width(text.as_str()) as u16,
            });
            (vec![Line::from(format!("  {text}"))], hint)
        }
        FieldId::Required => {
            let mark = if values.required { "x" } else { " " };
            let line = Line::from(format!(
                "  {REQUIRED_OFF_LABEL} [{mark}] {REQUIRED_ON_LABEL}"
            ));
            (vec![line], None)
        }
        FieldId::Choices => {
            let choices = editor.choice_editor();
            let mut lines = choice_lines(choices, &values.choices, focused);
            let input_index = lines.len();
            lines.push(input_line(choices));
            lines.push(counter_line(choices, values.choices.len(), focused));
            let hint = focused.then(|| CursorHint {
                line: input_index,
                column: 4 + UnicodeWidthStr::width(choices.pending()) as u16,
            });
            (lines, hint)
        }
        FieldId::DisplayAlpha => {
            let current = if values.display_alpha { "true" } else { "false" };
            let label = DISPLAY_ALPHA_OPTIONS
                .iter()
                .find(|(value, _)| *value == current)
                .map(|(_, label)| *label)
                .unwrap_or_default();
            let mut lines = vec![Line::from(format!("  {label} ▾"))];
            if !values.choices.is_empty() {
                let preview = format!("Preview: {}", values.display_order().join(", "));
                lines.extend(wrap(&preview, max_width).into_iter().map(|segment| {
                    Line::from(Span::styled(
                        format!("  {segment}"),
                        Style::default().fg(Color::DarkGray),
                    ))
                }));
            }
            (lines, None)
        }
    }
}
