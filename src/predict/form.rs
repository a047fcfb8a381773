// src/predict/form.rs — Editable prediction form state.

use crate::client::types::PredictionResult;
use crate::infra::errors::PredictError;

use super::fields::{CategoricalField, FormField, NumericField};
use super::PredictionRequest;

/// What the form shows under the submit button.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(PredictionResult),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    numeric: [String; 11],
    categorical: [Option<&'static str>; 5],
    focus: usize,
    predicting: bool,
    outcome: Option<PredictionOutcome>,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> FormField {
        FormField::at(self.focus)
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::COUNT;
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FormField::COUNT - 1) % FormField::COUNT;
    }

    pub fn numeric_text(&self, field: NumericField) -> &str {
        &self.numeric[field.index()]
    }

    pub fn set_numeric(&mut self, field: NumericField, text: impl Into<String>) {
        self.numeric[field.index()] = text.into();
    }

    pub fn selection(&self, field: CategoricalField) -> Option<&'static str> {
        self.categorical[field.index()]
    }

    pub fn select(&mut self, field: CategoricalField, value: Option<&'static str>) {
        self.categorical[field.index()] = value;
    }

    /// Display text of a field; `None` when empty / unselected.
    pub fn value_text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Numeric(f) => Some(self.numeric_text(f)).filter(|s| !s.is_empty()),
            FormField::Categorical(f) => self.selection(f),
        }
    }

    /// Type into the focused numeric field. Selectors ignore typing.
    pub fn input_char(&mut self, c: char) {
        if let FormField::Numeric(f) = self.focused() {
            self.numeric[f.index()].push(c);
        }
    }

    /// Backspace on the focused field; clears a selector.
    pub fn backspace(&mut self) {
        match self.focused() {
            FormField::Numeric(f) => {
                self.numeric[f.index()].pop();
            }
            FormField::Categorical(f) => self.select(f, None),
        }
    }

    /// Step the focused selector forward through unselected → options → unselected.
    pub fn cycle_next(&mut self) {
        self.cycle(1);
    }

    pub fn cycle_prev(&mut self) {
        self.cycle(-1);
    }

    fn cycle(&mut self, step: isize) {
        let FormField::Categorical(field) = self.focused() else {
            return;
        };
        let options = field.options();
        // Slot 0 is "unselected", slots 1..=n are the options.
        let slots = options.len() as isize + 1;
        let current = self
            .selection(field)
            .and_then(|v| options.iter().position(|o| *o == v))
            .map(|i| i as isize + 1)
            .unwrap_or(0);
        let next = (current + step).rem_euclid(slots);
        let value = if next == 0 {
            None
        } else {
            Some(options[next as usize - 1])
        };
        self.select(field, value);
    }

    /// Snapshot of the current entries as a request body.
    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest::from_entries(
            NumericField::ALL
                .iter()
                .map(|f| (*f, self.numeric[f.index()].as_str())),
            CategoricalField::ALL
                .iter()
                .map(|f| (*f, self.categorical[f.index()].unwrap_or(""))),
        )
    }

    pub fn is_predicting(&self) -> bool {
        self.predicting
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        self.outcome.as_ref()
    }

    /// Mark a submission in flight and clear the previous result.
    pub fn begin_prediction(&mut self) -> PredictionRequest {
        self.predicting = true;
        self.outcome = None;
        self.to_request()
    }

    /// Apply a completion. Completions are not ordered: whichever arrives
    /// last is what the form shows, and any completion clears `predicting`.
    pub fn finish_prediction(&mut self, result: Result<PredictionResult, PredictError>) {
        self.predicting = false;
        self.outcome = Some(match result {
            Ok(r) => PredictionOutcome::Success(r),
            Err(e) => {
                tracing::warn!("Prediction error: {}", e);
                PredictionOutcome::Failed(e.user_message().to_string())
            }
        });
    }
}
