// src/tui/widgets/prediction_form.rs — ROAS prediction form with inline result.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::theme::Theme;
use crate::tui::view::{FormRow, FormView, OutcomeView};

const LABEL_WIDTH: usize = 20;

pub fn render(f: &mut Frame, area: Rect, form: &FormView, focused: bool) {
    let block = Block::default()
        .title(" ROAS Prediction ")
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focus()
        } else {
            Theme::border()
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    let outcome_height = match form.outcome {
        Some(OutcomeView::Success { .. }) => 4,
        Some(OutcomeView::Failed(_)) => 3,
        None => 0,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(outcome_height),
        ])
        .split(inner);

    render_fields(f, chunks[0], form, focused);
    render_submit(f, chunks[1], form);
    if let Some(ref outcome) = form.outcome {
        render_outcome(f, chunks[2], outcome);
    }
}

fn render_fields(f: &mut Frame, area: Rect, form: &FormView, focused: bool) {
    let visible = area.height as usize;
    // Keep the focused row on screen when the panel is short.
    let focus_idx = form.rows.iter().position(|r| r.focused).unwrap_or(0);
    let skip = (focus_idx + 1).saturating_sub(visible);

    let lines: Vec<Line> = form
        .rows
        .iter()
        .skip(skip)
        .take(visible)
        .map(|row| field_line(row, focused))
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn field_line(row: &FormRow, panel_focused: bool) -> Line<'_> {
    let value_style = if row.is_placeholder {
        Theme::text_dim()
    } else {
        Theme::text()
    };
    let value = if row.is_selector {
        format!("\u{2039} {} \u{203A}", row.text)
    } else {
        row.text.clone()
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {:<width$}", row.label, width = LABEL_WIDTH),
            Theme::text_dim(),
        ),
        Span::styled(value, value_style),
    ]);
    if panel_focused && row.focused {
        line.style(Theme::selected())
    } else {
        line
    }
}

fn render_submit(f: &mut Frame, area: Rect, form: &FormView) {
    let style = if form.predicting {
        Theme::warning()
    } else {
        Theme::info()
    };
    let line = Line::from(vec![
        Span::styled(" [\u{23CE} ", style),
        Span::styled(form.submit_label, style),
        Span::styled("]", style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_outcome(f: &mut Frame, area: Rect, outcome: &OutcomeView) {
    match outcome {
        OutcomeView::Success {
            predicted_roas,
            decision,
        } => {
            let block = Block::default()
                .title(" Prediction Result ")
                .borders(Borders::ALL)
                .border_style(Theme::success());
            let lines = vec![
                Line::from(vec![
                    Span::styled("Predicted ROAS: ", Theme::text_dim()),
                    Span::styled(predicted_roas.clone(), Theme::prediction_value()),
                ]),
                Line::from(vec![
                    Span::styled("Decision: ", Theme::text_dim()),
                    Span::styled(decision.clone(), Theme::text()),
                ]),
            ];
            let p = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false });
            f.render_widget(p, area);
        }
        OutcomeView::Failed(message) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::error());
            let p = Paragraph::new(Line::from(Span::styled(
                format!("\u{2717} {}", message),
                Theme::error(),
            )))
            .block(block)
            .wrap(Wrap { trim: false });
            f.render_widget(p, area);
        }
    }
}
