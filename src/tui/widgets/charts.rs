// src/tui/widgets/charts.rs — Actual-vs-predicted scatter and feature importance bars.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset as ChartSeries, GraphType, Paragraph},
    Frame,
};

use crate::client::types::FeatureImportance;
use crate::tui::theme::Theme;
use crate::tui::view::{ConnectedView, ScatterView};

pub fn render(f: &mut Frame, area: Rect, view: &ConnectedView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_scatter(f, chunks[0], &view.scatter);
    render_feature_importance(f, chunks[1], &view.top_features, view.top_n);
}

fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![
        format!("{:.1}", bounds[0]),
        format!("{:.1}", mid),
        format!("{:.1}", bounds[1]),
    ]
}

fn render_scatter(f: &mut Frame, area: Rect, scatter: &ScatterView) {
    let block = Block::default()
        .title(" Actual vs Predicted ROAS ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let reference = scatter.reference;
    let series = vec![
        ChartSeries::default()
            .name("y = x")
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Theme::text_dim())
            .data(&reference),
        ChartSeries::default()
            .name("ROAS")
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Theme::info())
            .data(&scatter.points),
    ];

    let chart = Chart::new(series)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Actual ROAS", Theme::text_dim()))
                .style(Theme::text_dim())
                .bounds(scatter.bounds)
                .labels(axis_labels(scatter.bounds)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Predicted ROAS", Theme::text_dim()))
                .style(Theme::text_dim())
                .bounds(scatter.bounds)
                .labels(axis_labels(scatter.bounds)),
        );
    f.render_widget(chart, area);
}

fn render_feature_importance(
    f: &mut Frame,
    area: Rect,
    features: &[FeatureImportance],
    top_n: usize,
) {
    let block = Block::default()
        .title(format!(" Feature Importance (Top {}) ", top_n))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if features.is_empty() {
        let p = Paragraph::new(Line::from(Span::styled(
            "  No feature importance data.",
            Theme::text_dim(),
        )))
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let name_width = features
        .iter()
        .map(|feat| feat.feature.chars().count())
        .max()
        .unwrap_or(10)
        .min(24);
    let bar_width = (area.width as usize).saturating_sub(name_width + 16);

    let lines: Vec<Line> = features
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(2) as usize)
        .map(|(rank, feat)| {
            let bar: String = "\u{2588}".repeat(bar_len(feat.importance, features, bar_width));
            Line::from(vec![
                Span::styled(
                    format!("  {:>width$} ", truncate(&feat.feature, name_width), width = name_width),
                    Theme::text_dim(),
                ),
                Span::styled(bar, Theme::chart_bar(rank)),
                Span::styled(format!(" {:.4}", feat.importance), Theme::text()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Bars scale by magnitude against the largest magnitude shown.
fn bar_len(importance: f64, features: &[FeatureImportance], width: usize) -> usize {
    let max = features
        .iter()
        .map(|feat| feat.importance.abs())
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        ((importance.abs() / max) * width as f64).round() as usize
    } else {
        0
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}\u{2026}")
    }
}
