// src/tui/view.rs — Pure projection from dashboard state to what is drawn.
//
// Widgets only read these structs; nothing here touches the terminal, which
// keeps every visible string testable.

use crate::client::types::{Dataset, FeatureImportance, Metrics};
use crate::predict::{FormField, PredictionForm, PredictionOutcome};
use crate::session::{ConnectionState, ConnectionStatus};

pub const TITLE: &str = "ROAS Prediction Dashboard";
pub const URL_PLACEHOLDER: &str = "Enter Ngrok API URL (e.g., https://your-url.ngrok.io)";
pub const PROMPT_TEXT: &str = "Please enter API URL to load data";
pub const LOADING_TEXT: &str = "Loading data...";

/// Axis extent used for the reference line when there are no points.
const EMPTY_SCATTER_EXTENT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Connected,
    Connecting,
    Error,
    Disconnected,
}

impl StatusBadge {
    pub fn for_status(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Connected => StatusBadge::Connected,
            ConnectionStatus::Loading => StatusBadge::Connecting,
            ConnectionStatus::Error => StatusBadge::Error,
            ConnectionStatus::Disconnected => StatusBadge::Disconnected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Connected => "Connected",
            StatusBadge::Connecting => "Connecting...",
            StatusBadge::Error => "Error",
            StatusBadge::Disconnected => "Disconnected",
        }
    }
}

/// The button next to the URL input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectAction {
    Connect { enabled: bool },
    Connecting,
    Disconnect,
}

impl ConnectAction {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectAction::Connect { .. } => "Connect & Initialize",
            ConnectAction::Connecting => "Connecting...",
            ConnectAction::Disconnect => "Disconnect",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionBarView {
    pub title: &'static str,
    pub input: String,
    pub input_enabled: bool,
    pub action: ConnectAction,
    pub badge: StatusBadge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub description: &'static str,
}

pub fn metric_cards(metrics: &Metrics) -> Vec<MetricCard> {
    vec![
        MetricCard {
            label: "R² Score",
            value: format!("{:.4}", metrics.r2_score),
            description: "Model accuracy",
        },
        MetricCard {
            label: "RMSE",
            value: format!("{:.4}", metrics.rmse),
            description: "Root Mean Square Error",
        },
        MetricCard {
            label: "MAE",
            value: format!("{:.4}", metrics.mae),
            description: "Mean Absolute Error",
        },
    ]
}

/// Sort by importance, highest first, and keep the first `n`. Ties keep
/// their original order.
pub fn top_features(features: &[FeatureImportance], n: usize) -> Vec<FeatureImportance> {
    let mut sorted = features.to_vec();
    sorted.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    sorted.truncate(n);
    sorted
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    /// (actual, predicted) pairs.
    pub points: Vec<(f64, f64)>,
    /// Lower and upper bound shared by both axes.
    pub bounds: [f64; 2],
    /// The y = x reference segment, from origin to the largest value.
    pub reference: [(f64, f64); 2],
}

impl ScatterView {
    pub fn build(dataset: &Dataset) -> Self {
        let points: Vec<(f64, f64)> = dataset
            .scatter_points
            .iter()
            .map(|p| (p.actual, p.predicted))
            .collect();

        let max_value = if points.is_empty() {
            EMPTY_SCATTER_EXTENT
        } else {
            points
                .iter()
                .flat_map(|(a, p)| [*a, *p])
                .fold(f64::NEG_INFINITY, f64::max)
        };
        let min_value = points
            .iter()
            .flat_map(|(a, p)| [*a, *p])
            .fold(0.0_f64, f64::min);
        let upper = if max_value > min_value {
            max_value
        } else {
            min_value + 1.0
        };

        Self {
            points,
            bounds: [min_value, upper],
            reference: [(0.0, 0.0), (max_value, max_value)],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedView {
    pub base_url: String,
    pub model_info: String,
    pub metrics: Vec<MetricCard>,
    pub top_features: Vec<FeatureImportance>,
    /// Configured cap on `top_features`, shown in the chart title.
    pub top_n: usize,
    pub scatter: ScatterView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyView {
    Prompt(&'static str),
    Loading(&'static str),
    Error(String),
    Connected(ConnectedView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormRow {
    pub field: FormField,
    pub label: &'static str,
    /// Entered value, or the placeholder when empty.
    pub text: String,
    pub is_placeholder: bool,
    pub focused: bool,
    pub is_selector: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeView {
    Success { predicted_roas: String, decision: String },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub rows: Vec<FormRow>,
    pub submit_label: &'static str,
    pub predicting: bool,
    pub outcome: Option<OutcomeView>,
}

impl FormView {
    pub fn build(form: &PredictionForm) -> Self {
        let focused = form.focused();
        let rows = (0..FormField::COUNT)
            .map(FormField::at)
            .map(|field| {
                let value = form.value_text(field);
                FormRow {
                    field,
                    label: field.label(),
                    text: value.unwrap_or(field.placeholder()).to_string(),
                    is_placeholder: value.is_none(),
                    focused: field == focused,
                    is_selector: matches!(field, FormField::Categorical(_)),
                }
            })
            .collect();

        let outcome = form.outcome().map(|o| match o {
            PredictionOutcome::Success(r) => OutcomeView::Success {
                predicted_roas: format!("{:.4}", r.predicted_roas),
                decision: r.decision.clone(),
            },
            PredictionOutcome::Failed(msg) => OutcomeView::Failed(msg.clone()),
        });

        Self {
            rows,
            submit_label: if form.is_predicting() {
                "Predicting..."
            } else {
                "Predict ROAS"
            },
            predicting: form.is_predicting(),
            outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub bar: ConnectionBarView,
    pub body: BodyView,
    /// Present only while connected.
    pub form: Option<FormView>,
}

impl DashboardView {
    pub fn build(
        state: &ConnectionState,
        url_input: &str,
        form: &PredictionForm,
        top_n: usize,
    ) -> Self {
        let status = state.status();
        let action = match status {
            ConnectionStatus::Connected => ConnectAction::Disconnect,
            ConnectionStatus::Loading => ConnectAction::Connecting,
            _ => ConnectAction::Connect {
                enabled: !url_input.trim().is_empty(),
            },
        };

        let bar = ConnectionBarView {
            title: TITLE,
            input: url_input.to_string(),
            input_enabled: state.accepts_connect(),
            action,
            badge: StatusBadge::for_status(status),
        };

        let body = match state {
            ConnectionState::Disconnected => BodyView::Prompt(PROMPT_TEXT),
            ConnectionState::Loading { .. } => BodyView::Loading(LOADING_TEXT),
            ConnectionState::Error { .. } => BodyView::Error(state.error_message()),
            ConnectionState::Connected { base_url, dataset } => {
                BodyView::Connected(ConnectedView {
                    base_url: base_url.clone(),
                    model_info: dataset.model_info.clone(),
                    metrics: metric_cards(&dataset.metrics),
                    top_features: top_features(&dataset.feature_importances, top_n),
                    top_n,
                    scatter: ScatterView::build(dataset),
                })
            }
        };

        let form = matches!(body, BodyView::Connected(_)).then(|| FormView::build(form));

        Self { bar, body, form }
    }
}
