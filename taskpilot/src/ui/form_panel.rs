//! Task entry form rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};
use crate::editor::byte_index;
use crate::form::FormField;

/// Width reserved for field labels.
const LABEL_WIDTH: usize = 12;

/// Render the form, one line per field.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Form;

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| field_line(app, field, is_focused && app.form.focus() == field))
        .collect();

    let block = Block::default()
        .title("New task (Enter: add)")
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line(app: &App, field: FormField, is_active: bool) -> Line<'static> {
    let label_style = if is_active {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    let label = Span::styled(
        format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH),
        label_style,
    );

    let value = app.form.value(field);
    if is_active {
        // Split around the cursor so it can be drawn as a block.
        let at = byte_index(value, app.form.cursor());
        let (before, after) = value.split_at(at);
        Line::from(vec![
            label,
            Span::styled(before.to_string(), theme::normal()),
            Span::styled("█", theme::input_cursor()),
            Span::styled(after.to_string(), theme::normal()),
        ])
    } else if value.is_empty() {
        Line::from(vec![label, Span::styled(field.hint(), theme::dimmed())])
    } else {
        Line::from(vec![label, Span::styled(value.to_string(), theme::normal())])
    }
}
