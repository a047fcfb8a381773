// src/cli/predict.rs — One-shot prediction

use crate::client::types::PredictionResult;
use crate::client::PredictionBackend;
use crate::session::normalize_base_url;

use super::PredictArgs;

pub async fn run_predict(
    backend: &dyn PredictionBackend,
    url: &str,
    inputs: &PredictArgs,
) -> anyhow::Result<()> {
    let base_url = normalize_base_url(url);
    if base_url.is_empty() {
        anyhow::bail!("A backend URL is required");
    }
    let request = inputs.to_request();
    tracing::debug!(?request, "Submitting prediction");

    match backend.predict(&base_url, &request).await {
        Ok(result) => {
            print!("{}", format_result(&result));
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Prediction failed: {}", e);
            anyhow::bail!("{}", e.user_message())
        }
    }
}

pub fn format_result(result: &PredictionResult) -> String {
    format!(
        "Predicted ROAS: {:.4}\nDecision:       {}\n",
        result.predicted_roas, result.decision
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::types::Dataset;
    use crate::infra::errors::{LoadError, PredictError};
    use crate::predict::PredictionRequest;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<(String, PredictionRequest)>>,
        fail: bool,
    }

    #[async_trait]
    impl PredictionBackend for Recording {
        async fn load_data(&self, _base_url: &str) -> Result<Dataset, LoadError> {
            Err(LoadError::Unknown)
        }

        async fn predict(
            &self,
            base_url: &str,
            request: &PredictionRequest,
        ) -> Result<PredictionResult, PredictError> {
            self.seen
                .lock()
                .unwrap()
                .push((base_url.to_string(), request.clone()));
            if self.fail {
                return Err(PredictError::HttpStatus(422));
            }
            Ok(PredictionResult {
                status: "success".into(),
                predicted_roas: 2.5,
                decision: "Scale up".into(),
            })
        }
    }

    #[test]
    fn test_format_result() {
        let text = format_result(&PredictionResult {
            status: "success".into(),
            predicted_roas: 3.14159,
            decision: "Keep".into(),
        });
        assert!(text.contains("Predicted ROAS: 3.1416"));
        assert!(text.contains("Keep"));
    }

    #[tokio::test]
    async fn test_run_predict_sends_normalized_url_and_coerced_body() {
        let backend = Recording::default();
        let inputs = PredictArgs {
            budget: Some("250".into()),
            impressions: Some("1e3".into()),
            ..PredictArgs::default()
        };
        run_predict(&backend, " http://localhost:8000/ ", &inputs)
            .await
            .unwrap();

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "http://localhost:8000");
        assert_eq!(seen[0].1.budget, 250.0);
        assert_eq!(seen[0].1.impressions, 1);
    }

    #[tokio::test]
    async fn test_run_predict_failure_uses_generic_message() {
        let backend = Recording {
            fail: true,
            ..Recording::default()
        };
        let err = run_predict(&backend, "http://localhost:8000", &PredictArgs::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), PredictError::USER_MESSAGE);
    }
}
