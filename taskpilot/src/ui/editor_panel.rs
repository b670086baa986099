//! JSON editor rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};
use crate::editor::byte_index;

/// Render the editor buffer, scrolled so the cursor row stays visible.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Editor;
    let (cursor_row, cursor_col) = app.editor.cursor();

    let lines: Vec<Line> = app
        .editor
        .lines()
        .iter()
        .enumerate()
        .map(|(row, text)| {
            if is_focused && row == cursor_row {
                let at = byte_index(text, cursor_col);
                let (before, after) = text.split_at(at);
                Line::from(vec![
                    Span::styled(before, theme::normal()),
                    Span::styled("█", theme::input_cursor()),
                    Span::styled(after, theme::normal()),
                ])
            } else {
                Line::from(Span::styled(text.as_str(), theme::normal()))
            }
        })
        .collect();

    let visible_rows = usize::from(area.height.saturating_sub(2)).max(1);
    let offset = u16::try_from(cursor_row.saturating_sub(visible_rows - 1)).unwrap_or(u16::MAX);

    let block = Block::default()
        .title("Tasks JSON (Ctrl+A: analyze, Ctrl+S: suggest)")
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    let paragraph = Paragraph::new(lines).block(block).scroll((offset, 0));
    frame.render_widget(paragraph, area);
}
