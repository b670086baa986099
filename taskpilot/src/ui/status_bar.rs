//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
///
/// An active alert replaces the key help.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::Form => "Enter: add task | ↑↓: field | Tab: switch panel | Esc: quit",
        PanelFocus::Editor => "Type to edit JSON | Tab: switch panel | Esc: quit",
        PanelFocus::Cards => "↑↓/jk: scroll | Tab: switch panel | Esc: quit",
    };

    let pending: Vec<&str> = app.pending_requests().map(|e| e.as_str()).collect();
    let (dot_color, activity) = if pending.is_empty() {
        (theme::SUCCESS, "idle".to_string())
    } else {
        (theme::WARNING, format!("waiting: {}", pending.join(", ")))
    };

    let tail = app.alert.as_ref().map_or_else(
        || Span::styled(help_text, theme::dimmed()),
        |alert| Span::styled(alert.clone(), theme::alert()),
    );

    let status_line = Line::from(vec![
        Span::styled(concat!("TaskPilot v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {activity}")),
        Span::raw(format!(" | {} tasks | ", app.store.len())),
        tail,
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
