// src/tui/widgets/status.rs — Full-width cards shown instead of the dashboard body.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::theme::Theme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

fn render_card(f: &mut Frame, area: Rect, lines: Vec<Line>, border: Style) {
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner_height = area.height.saturating_sub(2);
    let pad = inner_height.saturating_sub(lines.len() as u16) / 2;

    let mut padded: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
    padded.extend(lines);

    let p = Paragraph::new(padded)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

pub fn render_prompt(f: &mut Frame, area: Rect, text: &str) {
    render_card(
        f,
        area,
        vec![Line::from(Span::styled(text.to_string(), Theme::text_dim()))],
        Theme::border(),
    );
}

pub fn render_loading(f: &mut Frame, area: Rect, text: &str, frame: usize) {
    render_card(
        f,
        area,
        vec![
            Line::from(Span::styled(SPINNER[frame % SPINNER.len()], Theme::info())),
            Line::from(""),
            Line::from(Span::styled(text.to_string(), Theme::text_dim())),
        ],
        Theme::border(),
    );
}

pub fn render_error(f: &mut Frame, area: Rect, message: &str) {
    render_card(
        f,
        area,
        vec![Line::from(Span::styled(message.to_string(), Theme::error()))],
        Theme::error(),
    );
}
