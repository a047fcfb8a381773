// tests/lifecycle_test.rs — Integration test: connection lifecycle and form
// through the dashboard state, with a scripted backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::oneshot;

use roas_dash::client::types::{Dataset, FeatureImportance, Metrics, PredictionResult};
use roas_dash::client::PredictionBackend;
use roas_dash::infra::errors::{LoadError, PredictError};
use roas_dash::predict::{CategoricalField, NumericField, PredictionRequest};
use roas_dash::session::ConnectionStatus;
use roas_dash::tui::state::{AppEvent, DashboardState, Focus};
use roas_dash::tui::view::{BodyView, ConnectAction, OutcomeView, StatusBadge};

/// Backend whose responses are released by the test, one URL at a time.
#[derive(Default)]
struct ScriptedBackend {
    loads: Mutex<HashMap<String, oneshot::Receiver<Result<Dataset, LoadError>>>>,
    predictions: Mutex<Vec<PredictionRequest>>,
}

impl ScriptedBackend {
    fn expect_load(&self, base_url: &str) -> oneshot::Sender<Result<Dataset, LoadError>> {
        let (tx, rx) = oneshot::channel();
        self.loads.lock().unwrap().insert(base_url.to_string(), rx);
        tx
    }
}

#[async_trait]
impl PredictionBackend for ScriptedBackend {
    async fn load_data(&self, base_url: &str) -> Result<Dataset, LoadError> {
        let rx = self.loads.lock().unwrap().remove(base_url);
        match rx {
            Some(rx) => rx.await.unwrap_or(Err(LoadError::Unknown)),
            None => Err(LoadError::NetworkUnreachable),
        }
    }

    async fn predict(
        &self,
        _base_url: &str,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictError> {
        self.predictions.lock().unwrap().push(request.clone());
        if request.budget < 0.0 {
            return Err(PredictError::HttpStatus(422));
        }
        Ok(PredictionResult {
            status: "success".into(),
            predicted_roas: request.budget / 100.0,
            decision: "Increase budget".into(),
        })
    }
}

fn dataset(r2: f64) -> Dataset {
    Dataset {
        status: "success".into(),
        metrics: Metrics {
            r2_score: r2,
            rmse: 1.2,
            mae: 0.9,
            mse: None,
        },
        feature_importances: vec![
            FeatureImportance {
                feature: "Clicks".into(),
                importance: 0.25,
            },
            FeatureImportance {
                feature: "Budget".into(),
                importance: 0.5,
            },
        ],
        ..Dataset::default()
    }
}

/// Run one load for the ticket the state hands out.
async fn load(
    state: &mut DashboardState,
    backend: &Arc<ScriptedBackend>,
    response: Result<Dataset, LoadError>,
) {
    let ticket = state.request_connect().expect("connect accepted");
    let tx = backend.expect_load(&ticket.base_url);
    tx.send(response).unwrap();
    let result = backend.load_data(&ticket.base_url).await;
    state.apply(AppEvent::LoadFinished { ticket, result });
}

#[tokio::test]
async fn test_connect_load_and_render() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);
    state.set_url_input("http://localhost:8000/");

    load(&mut state, &backend, Ok(dataset(0.87))).await;

    assert_eq!(state.controller().status(), ConnectionStatus::Connected);
    assert_eq!(state.controller().state().base_url(), "http://localhost:8000");
    assert_eq!(state.focus(), Focus::Form);

    let view = state.view();
    assert_eq!(view.bar.badge, StatusBadge::Connected);
    assert_eq!(view.bar.action, ConnectAction::Disconnect);
    assert!(!view.bar.input_enabled);
    let BodyView::Connected(connected) = &view.body else {
        panic!("expected connected body");
    };
    assert_eq!(connected.metrics[0].value, "0.8700");
    assert_eq!(connected.top_features[0].feature, "Budget");
    assert!(view.form.is_some());
}

#[tokio::test]
async fn test_failed_load_shows_message_and_allows_retry() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);
    state.set_url_input("http://localhost:8000");

    load(&mut state, &backend, Err(LoadError::UnexpectedResponseShape)).await;
    let view = state.view();
    assert_eq!(view.bar.badge, StatusBadge::Error);
    assert_eq!(
        view.body,
        BodyView::Error(LoadError::UnexpectedResponseShape.to_string())
    );
    assert!(view.form.is_none());
    assert!(view.bar.input_enabled);

    load(&mut state, &backend, Ok(dataset(0.5))).await;
    assert_eq!(state.controller().status(), ConnectionStatus::Connected);
}

#[tokio::test]
async fn test_stale_load_after_reconnect_is_discarded() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);

    // First attempt to A is left hanging.
    state.set_url_input("http://a.example");
    let ticket_a = state.request_connect().unwrap();
    let release_a = backend.expect_load(&ticket_a.base_url);
    let pending_a = {
        let backend = Arc::clone(&backend);
        let url = ticket_a.base_url.clone();
        tokio::spawn(async move { backend.load_data(&url).await })
    };

    // User gives up on A and connects to B, which answers first.
    state.request_disconnect();
    state.set_url_input("http://b.example");
    load(&mut state, &backend, Ok(dataset(0.91))).await;
    assert_eq!(state.controller().state().base_url(), "http://b.example");

    // A finally answers, with a failure.
    release_a.send(Err(LoadError::HttpError(500))).unwrap();
    let result_a = pending_a.await.unwrap();
    state.apply(AppEvent::LoadFinished {
        ticket: ticket_a,
        result: result_a,
    });

    assert_eq!(state.controller().status(), ConnectionStatus::Connected);
    let BodyView::Connected(connected) = state.view().body else {
        panic!("stale failure must not replace the live session");
    };
    assert_eq!(connected.metrics[0].value, "0.9100");
}

#[tokio::test]
async fn test_load_finishing_after_disconnect_is_ignored() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);
    state.set_url_input("http://localhost:8000");

    let ticket = state.request_connect().unwrap();
    backend
        .expect_load(&ticket.base_url)
        .send(Ok(dataset(0.8)))
        .unwrap();
    state.request_disconnect();

    let result = backend.load_data(&ticket.base_url).await;
    state.apply(AppEvent::LoadFinished { ticket, result });

    assert_eq!(state.controller().status(), ConnectionStatus::Disconnected);
    assert_eq!(
        state.view().body,
        BodyView::Prompt("Please enter API URL to load data")
    );
}

#[tokio::test]
async fn test_rejected_connects_make_no_request() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);

    state.set_url_input("   ");
    assert!(state.request_connect().is_none());
    assert!(state.notice().is_some());

    state.set_url_input("localhost:8000");
    assert!(state.request_connect().is_none());

    // While loading, a second connect is refused.
    state.set_url_input("http://localhost:8000");
    let ticket = state.request_connect().unwrap();
    assert!(state.request_connect().is_none());
    assert_eq!(state.controller().epoch(), ticket.epoch);

    assert!(backend.loads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_prediction_round_trip() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);
    state.set_url_input("http://localhost:8000");
    load(&mut state, &backend, Ok(dataset(0.87))).await;

    state.form_mut().set_numeric(NumericField::Budget, "250");
    state.form_mut().set_numeric(NumericField::Clicks, "12.7");
    state
        .form_mut()
        .select(CategoricalField::Platform, Some("Instagram"));

    let ticket = state.request_prediction().unwrap();
    let form = state.view().form.unwrap();
    assert!(form.predicting);
    assert_eq!(form.submit_label, "Predicting...");

    let result = backend.predict(&ticket.base_url, &ticket.request).await;
    state.apply(AppEvent::PredictionFinished {
        session_epoch: ticket.session_epoch,
        result,
    });

    let form = state.view().form.unwrap();
    assert!(!form.predicting);
    assert_eq!(
        form.outcome,
        Some(OutcomeView::Success {
            predicted_roas: "2.5000".into(),
            decision: "Increase budget".into(),
        })
    );

    let sent = backend.predictions.lock().unwrap();
    assert_eq!(sent[0].clicks, 12);
    assert_eq!(sent[0].platform, "Instagram");
    assert_eq!(sent[0].region, "");
}

#[tokio::test]
async fn test_prediction_failure_shows_generic_message() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);
    state.set_url_input("http://localhost:8000");
    load(&mut state, &backend, Ok(dataset(0.87))).await;

    state.form_mut().set_numeric(NumericField::Budget, "-5");
    let ticket = state.request_prediction().unwrap();
    let result = backend.predict(&ticket.base_url, &ticket.request).await;
    state.apply(AppEvent::PredictionFinished {
        session_epoch: ticket.session_epoch,
        result,
    });

    assert_eq!(
        state.view().form.unwrap().outcome,
        Some(OutcomeView::Failed(PredictError::USER_MESSAGE.to_string()))
    );
}

#[tokio::test]
async fn test_prediction_for_closed_session_is_dropped() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);
    state.set_url_input("http://localhost:8000");
    load(&mut state, &backend, Ok(dataset(0.87))).await;

    state.form_mut().set_numeric(NumericField::Budget, "300");
    let ticket = state.request_prediction().unwrap();

    // Disconnect and reconnect before the answer arrives.
    state.request_disconnect();
    load(&mut state, &backend, Ok(dataset(0.6))).await;

    let result = backend.predict(&ticket.base_url, &ticket.request).await;
    state.apply(AppEvent::PredictionFinished {
        session_epoch: ticket.session_epoch,
        result,
    });

    let form = state.view().form.unwrap();
    assert_eq!(form.outcome, None);
    assert!(!form.predicting);
    assert_eq!(state.form().numeric_text(NumericField::Budget), "");
}

#[tokio::test]
async fn test_disconnect_clears_session() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);
    state.set_url_input("http://localhost:8000");
    load(&mut state, &backend, Ok(dataset(0.87))).await;

    state.request_disconnect();

    let view = state.view();
    assert_eq!(view.bar.badge, StatusBadge::Disconnected);
    assert!(view.form.is_none());
    assert!(state.controller().state().dataset().is_none());
    // The entered URL stays for a quick reconnect.
    assert_eq!(view.bar.input, "http://localhost:8000");
}

#[tokio::test]
async fn test_blank_form_with_platform_sends_zeros() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut state = DashboardState::new(10);
    state.set_url_input("http://localhost:8000");
    load(&mut state, &backend, Ok(dataset(0.87))).await;

    state
        .form_mut()
        .select(CategoricalField::Platform, Some("Google"));
    let ticket = state.request_prediction().unwrap();

    let body = serde_json::to_value(&ticket.request).unwrap();
    for field in NumericField::ALL {
        assert_eq!(body[field.key()].as_f64(), Some(0.0), "{}", field.key());
    }
    assert_eq!(body["Platform"], "Google");
    assert_eq!(body["Region"], "");
}
