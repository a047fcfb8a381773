// src/client/mod.rs — HTTP client for the remote prediction backend

pub mod types;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::RequestBuilder;

use crate::infra::config::HttpConfig;
use crate::infra::errors::{LoadError, PredictError};
use crate::predict::PredictionRequest;
use types::{Dataset, LoadDataResponse, PredictionResult};

pub const LOAD_DATA_PATH: &str = "load-data";
pub const PREDICT_PATH: &str = "predict";

/// Tunneling proxies (ngrok) serve an HTML interstitial unless this is set.
pub const PROXY_WARNING_HEADER: &str = "ngrok-skip-browser-warning";

const BODY_PREVIEW_CHARS: usize = 200;

/// The two calls the dashboard makes against a backend.
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    async fn load_data(&self, base_url: &str) -> Result<Dataset, LoadError>;

    async fn predict(
        &self,
        base_url: &str,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictError>;
}

pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url, path)
}

fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains("application/json"))
}

fn preview(text: &str) -> String {
    text.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// Classify a `/load-data` body that already passed the content-type and
/// status checks.
pub fn parse_load_body(bytes: &[u8]) -> Result<Dataset, LoadError> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
        tracing::warn!("Invalid JSON from load-data: {}", e);
        LoadError::Unknown
    })?;

    if value["status"] == "error" {
        return Err(LoadError::BackendReportedError);
    }

    let resp: LoadDataResponse = serde_json::from_value(value).map_err(|e| {
        tracing::warn!("Unexpected load-data payload: {}", e);
        LoadError::Unknown
    })?;
    Ok(Dataset::from(resp))
}

/// Classify a `/predict` body that came back with a success status.
pub fn parse_predict_body(bytes: &[u8]) -> Result<PredictionResult, PredictError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| PredictError::Decode(e.to_string()))?;

    if value["status"] == "error" {
        return Err(PredictError::BackendReportedError);
    }

    serde_json::from_value(value).map_err(|e| PredictError::Decode(e.to_string()))
}

pub struct ApiClient {
    client: reqwest::Client,
    skip_proxy_warning: bool,
}

impl ApiClient {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            skip_proxy_warning: config.skip_proxy_warning,
        })
    }

    fn with_proxy_header(&self, request: RequestBuilder) -> RequestBuilder {
        if self.skip_proxy_warning {
            request.header(PROXY_WARNING_HEADER, "true")
        } else {
            request
        }
    }
}

#[async_trait]
impl PredictionBackend for ApiClient {
    async fn load_data(&self, base_url: &str) -> Result<Dataset, LoadError> {
        let url = endpoint(base_url, LOAD_DATA_PATH);
        tracing::info!("Attempting to connect to: {}", url);

        let request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json");
        let response = self
            .with_proxy_header(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {} failed: {}", url, e);
                if e.is_builder() {
                    LoadError::Unknown
                } else {
                    LoadError::NetworkUnreachable
                }
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        tracing::debug!(
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or("<none>"),
            "load-data response"
        );

        // Content-type is checked before the status: an HTML error page from
        // a proxy is a shape problem, whatever its status code.
        if !is_json_content_type(content_type.as_deref()) {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("Non-JSON response received: {}", preview(&text));
            return Err(LoadError::UnexpectedResponseShape);
        }

        if !status.is_success() {
            return Err(LoadError::HttpError(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read load-data body: {}", e);
            LoadError::Unknown
        })?;
        parse_load_body(&bytes)
    }

    async fn predict(
        &self,
        base_url: &str,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictError> {
        let url = endpoint(base_url, PREDICT_PATH);
        tracing::debug!("POST {}", url);

        let builder = self.client.post(&url).json(request);
        let response = self
            .with_proxy_header(builder)
            .send()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::HttpStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;
        parse_predict_body(&bytes)
    }
}
