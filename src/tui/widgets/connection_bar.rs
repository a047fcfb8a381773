// src/tui/widgets/connection_bar.rs — Title, URL input, connect action and status badge.

use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::theme::Theme;
use crate::tui::view::{ConnectAction, ConnectionBarView, URL_PLACEHOLDER};

const URL_PREFIX: &str = " URL: ";

pub fn render(
    f: &mut Frame,
    area: Rect,
    bar: &ConnectionBarView,
    notice: Option<&str>,
    focused: bool,
) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", bar.title), Theme::header()))
        .title_bottom(Line::from(vec![
            Span::raw(" "),
            Span::styled(format!(" {} ", bar.badge.label()), Theme::badge(bar.badge)),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_style(if focused && bar.input_enabled {
            Theme::border_focus()
        } else {
            Theme::border()
        });

    let input_span = if bar.input.is_empty() {
        Span::styled(URL_PLACEHOLDER, Theme::text_dim())
    } else if bar.input_enabled {
        Span::styled(bar.input.clone(), Theme::text())
    } else {
        Span::styled(bar.input.clone(), Theme::text_dim())
    };

    let action_style = match bar.action {
        ConnectAction::Connect { enabled: true } => Theme::info(),
        ConnectAction::Connect { enabled: false } => Theme::text_dim(),
        ConnectAction::Connecting => Theme::warning(),
        ConnectAction::Disconnect => Theme::text(),
    };
    let action_key = match bar.action {
        ConnectAction::Disconnect => "^D",
        _ => "\u{23CE}",
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(URL_PREFIX, Theme::text_dim()),
        input_span,
        Span::raw("   "),
        Span::styled(format!("[{} {}]", action_key, bar.action.label()), action_style),
    ])];
    if let Some(notice) = notice {
        lines.push(Line::from(Span::styled(format!(" {}", notice), Theme::error())));
    }

    let inner = block.inner(area);
    f.render_widget(Paragraph::new(lines).block(block), area);

    if focused && bar.input_enabled {
        let x = inner.x + (URL_PREFIX.len() + bar.input.chars().count()) as u16;
        f.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y));
    }
}
