// src/cli/load.rs — One-shot connect/load cycle

use crate::client::types::Dataset;
use crate::client::PredictionBackend;
use crate::session::{ConnectionState, Controller};
use crate::tui::view::{metric_cards, top_features, StatusBadge};

/// Run a single connect/load through the same lifecycle as the dashboard
/// and print the result. Fails with the user-facing message on error.
pub async fn run_load(
    backend: &dyn PredictionBackend,
    url: &str,
    json: bool,
    top_n: usize,
) -> anyhow::Result<()> {
    let mut controller = Controller::new();
    let ticket = controller.connect(url)?;
    let result = backend.load_data(&ticket.base_url).await;
    controller.complete_load(&ticket, result);

    match controller.state() {
        ConnectionState::Connected { base_url, dataset } => {
            if json {
                println!("{}", serde_json::to_string_pretty(dataset)?);
            } else {
                print!("{}", summary(base_url, dataset, top_n));
            }
            Ok(())
        }
        state => {
            let badge = StatusBadge::for_status(state.status());
            anyhow::bail!("{}: {}", badge.label(), state.error_message())
        }
    }
}

/// Plain-text report of a loaded dataset.
pub fn summary(base_url: &str, dataset: &Dataset, top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n",
        StatusBadge::Connected.label(),
        base_url
    ));
    if !dataset.model_info.is_empty() {
        out.push_str(&format!("  Model:      {}\n", dataset.model_info));
    }
    out.push_str(&format!("  Rows:       {}\n", dataset.row_count));
    out.push('\n');

    for card in metric_cards(&dataset.metrics) {
        out.push_str(&format!(
            "  {:<10}  {:>10}  {}\n",
            card.label, card.value, card.description
        ));
    }

    let features = top_features(&dataset.feature_importances, top_n);
    if !features.is_empty() {
        out.push_str(&format!("\n  Feature Importance (Top {}):\n", features.len()));
        for (rank, feat) in features.iter().enumerate() {
            out.push_str(&format!(
                "    {:>2}. {:<24} {:.4}\n",
                rank + 1,
                feat.feature,
                feat.importance
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::types::{FeatureImportance, Metrics, PredictionResult};
    use crate::infra::errors::{LoadError, PredictError};
    use crate::predict::PredictionRequest;
    use async_trait::async_trait;

    struct Fixed(Result<Dataset, LoadError>);

    #[async_trait]
    impl PredictionBackend for Fixed {
        async fn load_data(&self, _base_url: &str) -> Result<Dataset, LoadError> {
            self.0.clone()
        }

        async fn predict(
            &self,
            _base_url: &str,
            _request: &PredictionRequest,
        ) -> Result<PredictionResult, PredictError> {
            Err(PredictError::BackendReportedError)
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            model_info: "RandomForest".into(),
            row_count: 3,
            metrics: Metrics {
                r2_score: 0.87,
                rmse: 1.2,
                mae: 0.9,
                mse: None,
            },
            feature_importances: vec![
                FeatureImportance {
                    feature: "Clicks".into(),
                    importance: 0.1,
                },
                FeatureImportance {
                    feature: "Budget".into(),
                    importance: 0.4,
                },
            ],
            ..Dataset::default()
        }
    }

    #[test]
    fn test_summary_lists_metrics_and_sorted_features() {
        let text = summary("http://localhost:8000", &dataset(), 10);
        assert!(text.starts_with("Connected (http://localhost:8000)"));
        assert!(text.contains("RandomForest"));
        assert!(text.contains("0.8700"));
        assert!(text.contains("Root Mean Square Error"));
        let budget = text.find("Budget").unwrap();
        let clicks = text.find("Clicks").unwrap();
        assert!(budget < clicks);
    }

    #[test]
    fn test_summary_respects_top_n() {
        let text = summary("http://x", &dataset(), 1);
        assert!(text.contains("Top 1"));
        assert!(!text.contains("Clicks"));
    }

    #[tokio::test]
    async fn test_run_load_success() {
        let backend = Fixed(Ok(dataset()));
        run_load(&backend, "http://localhost:8000/", false, 10)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_run_load_reports_user_message() {
        let backend = Fixed(Err(LoadError::HttpError(503)));
        let err = run_load(&backend, "http://localhost:8000", false, 10)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error: HTTP error! status: 503");
    }

    #[tokio::test]
    async fn test_run_load_rejects_empty_url() {
        let backend = Fixed(Ok(dataset()));
        assert!(run_load(&backend, "   ", false, 10).await.is_err());
    }
}
