//! Terminal UI rendering.

pub mod editor_panel;
pub mod form_panel;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;
use crate::form::FormField;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Create main layout with status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    // Input column on the left, cards on the right
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(content_area);

    #[allow(clippy::cast_possible_truncation)]
    let form_height = FormField::ALL.len() as u16 + 2;
    let input_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(3)])
        .split(content_chunks[0]);

    form_panel::render(frame, input_chunks[0], app);
    editor_panel::render(frame, input_chunks[1], app);
    task_panel::render(frame, content_chunks[1], app);

    status_bar::render(frame, status_area, app);
}
