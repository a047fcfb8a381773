// src/tui/state.rs — Dashboard state owned by the event loop.
//
// Network work is requested through tickets and comes back as `AppEvent`s;
// all mutation happens here, on the loop thread.

use crate::client::types::{Dataset, PredictionResult};
use crate::infra::errors::{LoadError, PredictError};
use crate::predict::{PredictionForm, PredictionRequest};
use crate::session::{ConnectionStatus, Controller, LoadTicket};

use super::view::DashboardView;

/// Which part of the screen receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    UrlBar,
    Form,
}

/// A prediction the caller must send, tagged with the session it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionTicket {
    pub session_epoch: u64,
    pub base_url: String,
    pub request: PredictionRequest,
}

/// Completions delivered back to the loop.
#[derive(Debug)]
pub enum AppEvent {
    LoadFinished {
        ticket: LoadTicket,
        result: Result<Dataset, LoadError>,
    },
    PredictionFinished {
        session_epoch: u64,
        result: Result<PredictionResult, PredictError>,
    },
}

#[derive(Debug)]
pub struct DashboardState {
    controller: Controller,
    url_input: String,
    form: PredictionForm,
    focus: Focus,
    top_features: usize,
    /// Last rejected connect, shown under the URL bar until the next edit.
    notice: Option<String>,
}

impl DashboardState {
    pub fn new(top_features: usize) -> Self {
        Self {
            controller: Controller::new(),
            url_input: String::new(),
            form: PredictionForm::new(),
            focus: Focus::UrlBar,
            top_features,
            notice: None,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn form(&self) -> &PredictionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PredictionForm {
        &mut self.form
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Edit the URL bar. Ignored while the input is disabled.
    pub fn set_url_input(&mut self, text: impl Into<String>) {
        if self.controller.state().accepts_connect() {
            self.url_input = text.into();
            self.notice = None;
        }
    }

    pub fn push_url_char(&mut self, c: char) {
        let mut text = self.url_input.clone();
        text.push(c);
        self.set_url_input(text);
    }

    pub fn pop_url_char(&mut self) {
        let mut text = self.url_input.clone();
        text.pop();
        self.set_url_input(text);
    }

    /// Connect using the URL bar contents.
    pub fn request_connect(&mut self) -> Option<LoadTicket> {
        match self.controller.connect(&self.url_input) {
            Ok(ticket) => {
                self.form = PredictionForm::new();
                self.notice = None;
                self.focus = Focus::UrlBar;
                Some(ticket)
            }
            Err(rejected) => {
                tracing::debug!("Connect rejected: {}", rejected);
                self.notice = Some(rejected.to_string());
                None
            }
        }
    }

    pub fn request_disconnect(&mut self) {
        self.controller.disconnect();
        self.form = PredictionForm::new();
        self.focus = Focus::UrlBar;
        self.notice = None;
    }

    /// Submit the form. Only possible while connected; a submission while
    /// another is in flight is allowed and races with it.
    pub fn request_prediction(&mut self) -> Option<PredictionTicket> {
        if self.controller.status() != ConnectionStatus::Connected {
            return None;
        }
        let request = self.form.begin_prediction();
        Some(PredictionTicket {
            session_epoch: self.controller.epoch(),
            base_url: self.controller.state().base_url().to_string(),
            request,
        })
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::UrlBar if self.controller.status() == ConnectionStatus::Connected => Focus::Form,
            _ => Focus::UrlBar,
        };
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoadFinished { ticket, result } => {
                if self.controller.complete_load(&ticket, result)
                    && self.controller.status() == ConnectionStatus::Connected
                {
                    self.focus = Focus::Form;
                }
            }
            AppEvent::PredictionFinished {
                session_epoch,
                result,
            } => {
                // The form this answers was discarded with its session.
                if session_epoch != self.controller.epoch() {
                    tracing::debug!(
                        session_epoch,
                        current_epoch = self.controller.epoch(),
                        "Discarding prediction for a closed session"
                    );
                    return;
                }
                self.form.finish_prediction(result);
            }
        }
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::build(
            self.controller.state(),
            &self.url_input,
            &self.form,
            self.top_features,
        )
    }
}
