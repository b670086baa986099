//! Task card rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};
use crate::render::TaskCard;

/// Render the cards in display order, starting at the scroll offset.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Cards;

    let block = Block::default()
        .title(format!("Tasks [{}] (Ctrl+R: change)", app.strategy.label()))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    if app.cards.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No tasks yet. Add one with the form or paste JSON and analyze.",
            theme::dimmed(),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = app
        .cards
        .iter()
        .skip(app.card_scroll)
        .map(card_item)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn card_item(card: &TaskCard) -> ListItem<'static> {
    let accent = theme::normal().fg(theme::priority_color(card.priority));

    let text = Text::from(vec![
        Line::from(vec![
            Span::styled("▌ ", accent),
            Span::styled(card.heading(), theme::bold()),
            Span::raw(" "),
            Span::styled(format!("[{}]", card.priority), accent),
        ]),
        Line::from(vec![
            Span::styled("▌ ", accent),
            Span::styled(card.details(), theme::normal()),
        ]),
        Line::from(vec![
            Span::styled("▌ ", accent),
            Span::styled(card.reason(), theme::dimmed()),
        ]),
        Line::default(),
    ]);

    ListItem::new(text)
}
