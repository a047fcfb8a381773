// src/tui/widgets/metrics.rs — Row of model-quality metric cards.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::theme::Theme;
use crate::tui::view::MetricCard;

/// One-line session summary above the metric cards.
pub fn render_model_line(f: &mut Frame, area: Rect, model_info: &str, base_url: &str) {
    let model = if model_info.is_empty() {
        "unknown"
    } else {
        model_info
    };
    let line = Line::from(vec![
        Span::styled(" Model: ", Theme::text_dim()),
        Span::styled(model.to_string(), Theme::text()),
        Span::styled("   Backend: ", Theme::text_dim()),
        Span::styled(base_url.to_string(), Theme::text()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

pub fn render(f: &mut Frame, area: Rect, cards: &[MetricCard]) {
    if cards.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, chunk) in cards.iter().zip(chunks.iter()) {
        let block = Block::default()
            .title(format!(" {} ", card.label))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let lines = vec![
            Line::from(Span::styled(card.value.clone(), Theme::metric_value())),
            Line::from(Span::styled(card.description, Theme::text_dim())),
        ];
        f.render_widget(Paragraph::new(lines).block(block), *chunk);
    }
}
