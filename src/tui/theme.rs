// src/tui/theme.rs — Color scheme and style definitions for the TUI dashboard.

use ratatui::style::{Color, Modifier, Style};

use super::view::StatusBadge;

/// Dashboard palette.
pub struct Theme;

impl Theme {
    // ── Base colors ──────────────────────────────────────────────
    pub const FG: Color = Color::Rgb(235, 235, 240);
    pub const DIM: Color = Color::Rgb(120, 120, 140);
    pub const BORDER: Color = Color::Rgb(80, 80, 100);
    pub const PRIMARY: Color = Color::Rgb(37, 99, 235);
    pub const EMERALD: Color = Color::Rgb(16, 185, 129);
    pub const DESTRUCTIVE: Color = Color::Rgb(230, 80, 80);
    pub const AMBER: Color = Color::Rgb(230, 200, 60);

    /// Bar colors for the feature-importance chart, cycled by rank.
    pub const CHART: [Color; 5] = [
        Color::Rgb(22, 163, 74),
        Color::Rgb(14, 165, 233),
        Color::Rgb(177, 98, 219),
        Color::Rgb(232, 140, 48),
        Color::Rgb(232, 48, 79),
    ];

    // ── Semantic styles ──────────────────────────────────────────

    /// Main title / header bar.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Theme::BORDER)
    }

    /// Border of the panel that receives typing.
    pub fn border_focus() -> Style {
        Style::default().fg(Theme::PRIMARY)
    }

    pub fn text() -> Style {
        Style::default().fg(Theme::FG)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Theme::DIM)
    }

    pub fn success() -> Style {
        Style::default().fg(Theme::EMERALD)
    }

    pub fn warning() -> Style {
        Style::default().fg(Theme::AMBER)
    }

    pub fn error() -> Style {
        Style::default().fg(Theme::DESTRUCTIVE)
    }

    pub fn info() -> Style {
        Style::default().fg(Theme::PRIMARY)
    }

    /// Large metric values.
    pub fn metric_value() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::BOLD)
    }

    /// Predicted ROAS in the result card.
    pub fn prediction_value() -> Style {
        Style::default()
            .fg(Theme::EMERALD)
            .add_modifier(Modifier::BOLD)
    }

    /// Focused form row.
    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Rgb(40, 40, 60))
            .fg(Theme::FG)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Theme::PRIMARY)
    }

    pub fn key_desc() -> Style {
        Style::default().fg(Theme::DIM)
    }

    pub fn badge(badge: StatusBadge) -> Style {
        match badge {
            StatusBadge::Connected => Style::default()
                .fg(Color::White)
                .bg(Theme::EMERALD)
                .add_modifier(Modifier::BOLD),
            StatusBadge::Connecting => Style::default().fg(Theme::AMBER),
            StatusBadge::Error => Style::default()
                .fg(Color::White)
                .bg(Theme::DESTRUCTIVE)
                .add_modifier(Modifier::BOLD),
            StatusBadge::Disconnected => Style::default().fg(Theme::DIM),
        }
    }

    pub fn chart_bar(rank: usize) -> Style {
        Style::default().fg(Theme::CHART[rank % Theme::CHART.len()])
    }
}
