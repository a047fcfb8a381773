// src/client/types.rs — Wire payloads of the prediction backend and the
// in-memory dataset built from them.
//
// Only `metrics` and the rendered series (`feature_importance`,
// `scatter_data`) must match their shape. Passthrough fields accept any JSON
// so an odd value in them never fails a load.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Regression quality indicators. Formatted for display, never recomputed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub r2_score: f64,
    pub rmse: f64,
    pub mae: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mse: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// One observation of the evaluation set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    #[serde(rename = "Actual")]
    pub actual: f64,
    #[serde(rename = "Predicted")]
    pub predicted: f64,
}

/// Histogram of ROAS values. `None` marks a bucket the backend sent as
/// `null` (NaN on its side) or as a non-number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoasDistribution {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl RoasDistribution {
    fn from_value(value: &Value) -> Self {
        let items = |key: &str| value[key].as_array().cloned().unwrap_or_default();
        Self {
            labels: items("labels").into_iter().map(value_text).collect(),
            values: items("values").iter().map(Value::as_f64).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Visualizations {
    #[serde(default, deserialize_with = "lenient_distribution")]
    pub roas_distribution: RoasDistribution,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scatter_data: Vec<ScatterPoint>,
}

/// Body of `GET /load-data`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadDataResponse {
    #[serde(default, deserialize_with = "any_as_text")]
    pub status: String,
    #[serde(default)]
    pub model_info: Value,
    /// Raw rows; only counted.
    #[serde(default)]
    pub data: Value,
    pub metrics: Metrics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature_importance: Vec<FeatureImportance>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visualizations: Visualizations,
}

/// Snapshot of one successful load. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub status: String,
    pub model_info: String,
    pub row_count: usize,
    pub metrics: Metrics,
    pub feature_importances: Vec<FeatureImportance>,
    pub scatter_points: Vec<ScatterPoint>,
    pub roas_distribution: RoasDistribution,
}

impl From<LoadDataResponse> for Dataset {
    fn from(resp: LoadDataResponse) -> Self {
        Self {
            status: resp.status,
            model_info: value_text(resp.model_info),
            row_count: resp.data.as_array().map_or(0, Vec::len),
            metrics: resp.metrics,
            feature_importances: resp.feature_importance,
            scatter_points: resp.visualizations.scatter_data,
            roas_distribution: resp.visualizations.roas_distribution,
        }
    }
}

/// Strings as-is, `null` as empty, anything else as compact JSON.
fn value_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn any_as_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Value::deserialize(d).map(value_text)
}

/// `null` reads as the default; any other value must still match `T`.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn lenient_distribution<'de, D: Deserializer<'de>>(d: D) -> Result<RoasDistribution, D::Error> {
    Value::deserialize(d).map(|v| RoasDistribution::from_value(&v))
}

/// Body of a successful `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default, deserialize_with = "any_as_text")]
    pub status: String,
    pub predicted_roas: f64,
    #[serde(default)]
    pub decision: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_payload_maps_to_dataset() {
        let body = serde_json::json!({
            "status": "success",
            "model_info": "XGBoost regressor",
            "data": [{"Budget": 100}, {"Budget": 200}],
            "metrics": {"r2_score": 0.87, "rmse": 1.2, "mae": 0.9, "mse": 1.44},
            "feature_importance": [{"feature": "Budget", "importance": 0.4}],
            "visualizations": {
                "roas_distribution": {"labels": ["0-1", "1-2"], "values": [3, 5]},
                "scatter_data": [{"Actual": 2.0, "Predicted": 2.1}]
            }
        });
        let resp: LoadDataResponse = serde_json::from_value(body).unwrap();
        let ds = Dataset::from(resp);

        assert_eq!(ds.status, "success");
        assert_eq!(ds.model_info, "XGBoost regressor");
        assert_eq!(ds.row_count, 2);
        assert_eq!(ds.metrics.mse, Some(1.44));
        assert_eq!(
            ds.scatter_points,
            vec![ScatterPoint {
                actual: 2.0,
                predicted: 2.1
            }]
        );
        assert_eq!(ds.roas_distribution.labels, vec!["0-1", "1-2"]);
        assert_eq!(ds.roas_distribution.values, vec![Some(3.0), Some(5.0)]);
    }

    #[test]
    fn test_optional_sections_default() {
        let body = serde_json::json!({
            "metrics": {"r2_score": 0.5, "rmse": 1.0, "mae": 0.7}
        });
        let resp: LoadDataResponse = serde_json::from_value(body).unwrap();
        let ds = Dataset::from(resp);
        assert!(ds.metrics.mse.is_none());
        assert!(ds.feature_importances.is_empty());
        assert!(ds.scatter_points.is_empty());
        assert_eq!(ds.model_info, "");
        assert_eq!(ds.row_count, 0);
    }

    #[test]
    fn test_structured_model_info_is_kept_as_json_text() {
        let body = serde_json::json!({
            "model_info": {"name": "rf"},
            "metrics": {"r2_score": 0.5, "rmse": 1.0, "mae": 0.7}
        });
        let resp: LoadDataResponse = serde_json::from_value(body).unwrap();
        assert_eq!(Dataset::from(resp).model_info, r#"{"name":"rf"}"#);
    }

    #[test]
    fn test_passthrough_fields_accept_any_shape() {
        let body = serde_json::json!({
            "status": null,
            "model_info": null,
            "data": null,
            "metrics": {"r2_score": 0.5, "rmse": 1.0, "mae": 0.7},
            "feature_importance": null,
            "visualizations": {
                "roas_distribution": {"labels": [1, 2, null], "values": [4, null, "x"]},
                "scatter_data": null
            }
        });
        let resp: LoadDataResponse = serde_json::from_value(body).unwrap();
        let ds = Dataset::from(resp);
        assert_eq!(ds.status, "");
        assert_eq!(ds.model_info, "");
        assert_eq!(ds.row_count, 0);
        assert!(ds.feature_importances.is_empty());
        assert!(ds.scatter_points.is_empty());
        assert_eq!(ds.roas_distribution.labels, vec!["1", "2", ""]);
        assert_eq!(ds.roas_distribution.values, vec![Some(4.0), None, None]);
    }

    #[test]
    fn test_distribution_of_wrong_type_is_empty() {
        let body = serde_json::json!({
            "data": {"rows": 3},
            "metrics": {"r2_score": 0.5, "rmse": 1.0, "mae": 0.7},
            "visualizations": {"roas_distribution": "n/a"}
        });
        let resp: LoadDataResponse = serde_json::from_value(body).unwrap();
        let ds = Dataset::from(resp);
        assert_eq!(ds.row_count, 0);
        assert_eq!(ds.roas_distribution, RoasDistribution::default());
    }

    #[test]
    fn test_malformed_scatter_is_rejected() {
        let body = serde_json::json!({
            "metrics": {"r2_score": 0.5, "rmse": 1.0, "mae": 0.7},
            "visualizations": {"scatter_data": [{"Actual": "high"}]}
        });
        assert!(serde_json::from_value::<LoadDataResponse>(body).is_err());
    }

    #[test]
    fn test_missing_metrics_is_rejected() {
        let body = serde_json::json!({"status": "success"});
        assert!(serde_json::from_value::<LoadDataResponse>(body).is_err());
    }

    #[test]
    fn test_prediction_result_parses() {
        let body = serde_json::json!({
            "status": "success",
            "predicted_roas": 3.25,
            "decision": "Scale up"
        });
        let result: PredictionResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.predicted_roas, 3.25);
        assert_eq!(result.decision, "Scale up");
    }
}
