// src/tui/app.rs — TUI event loop, network dispatch, and layout.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::PredictionBackend;
use crate::infra::config::Config;
use crate::session::LoadTicket;

use super::state::{AppEvent, DashboardState, Focus, PredictionTicket};
use super::theme::Theme;
use super::view::{BodyView, ConnectedView, DashboardView};
use super::widgets;

// ── App ──────────────────────────────────────────────────────────

struct App {
    state: DashboardState,
    backend: Arc<dyn PredictionBackend>,
    runtime: Handle,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Ticks since start, drives the loading spinner.
    frame: usize,
}

enum Flow {
    Continue,
    Quit,
}

impl App {
    fn new(config: &Config, backend: Arc<dyn PredictionBackend>, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: DashboardState::new(config.dashboard.top_features),
            backend,
            runtime,
            events_tx,
            events_rx,
            frame: 0,
        }
    }

    fn spawn_load(&self, ticket: LoadTicket) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.load_data(&ticket.base_url).await;
            // The receiver only goes away when the dashboard has quit.
            let _ = tx.send(AppEvent::LoadFinished { ticket, result });
        });
    }

    fn spawn_prediction(&self, ticket: PredictionTicket) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.predict(&ticket.base_url, &ticket.request).await;
            let _ = tx.send(AppEvent::PredictionFinished {
                session_epoch: ticket.session_epoch,
                result,
            });
        });
    }

    fn connect(&mut self) {
        if let Some(ticket) = self.state.request_connect() {
            self.spawn_load(ticket);
        }
    }

    /// Apply every completion that has arrived since the last tick.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.state.apply(event);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('d') if ctrl => {
                self.state.request_disconnect();
                return Flow::Continue;
            }
            KeyCode::Tab if self.state.focus() == Focus::UrlBar => {
                self.state.toggle_focus();
                return Flow::Continue;
            }
            _ => {}
        }

        match self.state.focus() {
            Focus::UrlBar => match key.code {
                KeyCode::Enter => self.connect(),
                KeyCode::Backspace => self.state.pop_url_char(),
                KeyCode::Char(c) if !ctrl => self.state.push_url_char(c),
                _ => {}
            },
            Focus::Form => match key.code {
                KeyCode::Enter => {
                    if let Some(ticket) = self.state.request_prediction() {
                        self.spawn_prediction(ticket);
                    }
                }
                KeyCode::Down | KeyCode::Tab => self.state.form_mut().focus_next(),
                KeyCode::Up => self.state.form_mut().focus_prev(),
                KeyCode::BackTab => self.state.toggle_focus(),
                KeyCode::Right => self.state.form_mut().cycle_next(),
                KeyCode::Left => self.state.form_mut().cycle_prev(),
                KeyCode::Backspace => self.state.form_mut().backspace(),
                KeyCode::Char(c) if !ctrl => self.state.form_mut().input_char(c),
                _ => {}
            },
        }
        Flow::Continue
    }
}

// ── Public entry point ───────────────────────────────────────────

/// Launch the TUI dashboard. Blocks until the user quits (Esc / Ctrl-C).
///
/// Must be called off the async executor (e.g. from `spawn_blocking`):
/// network calls are spawned onto `runtime` while this thread polls the
/// terminal.
pub fn run_dashboard(
    config: &Config,
    backend: Arc<dyn PredictionBackend>,
    runtime: Handle,
    initial_url: Option<String>,
) -> anyhow::Result<()> {
    let mut app = App::new(config, backend, runtime);

    if let Some(url) = initial_url {
        app.state.set_url_input(url);
        app.connect();
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick = Duration::from_millis(config.dashboard.tick_rate_ms.max(10));
    let result = run_event_loop(&mut terminal, &mut app, tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> anyhow::Result<()> {
    loop {
        app.drain_events();

        let view = app.state.view();
        let focus = app.state.focus();
        let notice = app.state.notice().map(str::to_owned);
        let frame = app.frame;
        terminal.draw(|f| render(f, &view, focus, notice.as_deref(), frame))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Flow::Quit = app.handle_key(key) {
                    return Ok(());
                }
            }
        } else {
            app.frame = app.frame.wrapping_add(1);
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────

pub fn render(
    f: &mut Frame,
    view: &DashboardView,
    focus: Focus,
    notice: Option<&str>,
    frame: usize,
) {
    let bar_height = if notice.is_some() { 4 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(bar_height), // Connection bar
            Constraint::Min(10),            // Body
            Constraint::Length(1),          // Footer / key hints
        ])
        .split(f.area());

    widgets::connection_bar::render(f, chunks[0], &view.bar, notice, focus == Focus::UrlBar);
    render_body(f, chunks[1], view, focus, frame);
    render_footer(f, chunks[2], view);
}

fn render_body(f: &mut Frame, area: Rect, view: &DashboardView, focus: Focus, frame: usize) {
    match &view.body {
        BodyView::Prompt(text) => widgets::status::render_prompt(f, area, text),
        BodyView::Loading(text) => widgets::status::render_loading(f, area, text, frame),
        BodyView::Error(message) => widgets::status::render_error(f, area, message),
        BodyView::Connected(connected) => render_connected(f, area, view, connected, focus),
    }
}

fn render_connected(
    f: &mut Frame,
    area: Rect,
    view: &DashboardView,
    connected: &ConnectedView,
    focus: Focus,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Model / backend line
            Constraint::Length(4), // Metric cards
            Constraint::Min(8),    // Form + charts
        ])
        .split(area);
    widgets::metrics::render_model_line(f, rows[0], &connected.model_info, &connected.base_url);
    widgets::metrics::render(f, rows[1], &connected.metrics);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    if let Some(ref form) = view.form {
        widgets::prediction_form::render(f, cols[0], form, focus == Focus::Form);
    }
    widgets::charts::render(f, cols[1], connected);
}

fn render_footer(f: &mut Frame, area: Rect, view: &DashboardView) {
    let mut spans = vec![
        Span::styled(" Esc", Theme::key_hint()),
        Span::styled(" quit  ", Theme::key_desc()),
        Span::styled("Tab", Theme::key_hint()),
        Span::styled(" focus  ", Theme::key_desc()),
    ];
    if view.form.is_some() {
        spans.extend([
            Span::styled("\u{2191}\u{2193}", Theme::key_hint()),
            Span::styled(" field  ", Theme::key_desc()),
            Span::styled("\u{2190}\u{2192}", Theme::key_hint()),
            Span::styled(" select  ", Theme::key_desc()),
            Span::styled("\u{23CE}", Theme::key_hint()),
            Span::styled(" predict  ", Theme::key_desc()),
        ]);
    } else {
        spans.extend([
            Span::styled("\u{23CE}", Theme::key_hint()),
            Span::styled(" connect  ", Theme::key_desc()),
        ]);
    }
    spans.extend([
        Span::styled("^D", Theme::key_hint()),
        Span::styled(" disconnect", Theme::key_desc()),
    ]);

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
