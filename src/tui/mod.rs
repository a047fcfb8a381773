// src/tui/mod.rs — TUI dashboard module.
//
// Terminal dashboard for a ROAS prediction backend, built with ratatui.
// Launch via `roas-dash` or `roas-dash dashboard`.

pub mod app;
pub mod state;
pub mod theme;
pub mod view;
pub mod widgets;

pub use app::run_dashboard;
