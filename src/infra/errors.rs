// src/infra/errors.rs — Error types for the ROAS dashboard

use thiserror::Error;

/// Why a `/load-data` call did not produce a dataset.
///
/// Every variant leads to the same `error` connection state; they differ only
/// in the message shown to the user, which is the `Display` text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Network error. Check if your backend is running and accessible.")]
    NetworkUnreachable,

    #[error(
        "Server returned non-JSON response. Make sure your backend is running and the URL is correct."
    )]
    UnexpectedResponseShape,

    #[error("HTTP error! status: {0}")]
    HttpError(u16),

    #[error("Backend returned error status")]
    BackendReportedError,

    #[error("Connection Failed. Check URL or Backend.")]
    Unknown,
}

impl LoadError {
    /// Stable short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::NetworkUnreachable => "network_unreachable",
            LoadError::UnexpectedResponseShape => "unexpected_response_shape",
            LoadError::HttpError(_) => "http_error",
            LoadError::BackendReportedError => "backend_reported_error",
            LoadError::Unknown => "unknown",
        }
    }
}

/// Why a `/predict` call failed. The cause is logged; the user only ever
/// sees [`PredictError::user_message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    #[error("prediction request failed: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Prediction failed on server")]
    BackendReportedError,

    #[error("invalid prediction response: {0}")]
    Decode(String),
}

impl PredictError {
    pub const USER_MESSAGE: &'static str =
        "Prediction failed. Please check your inputs and try again.";

    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }
}

/// A connect request refused before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectRejected {
    #[error("A connection is already active or loading. Disconnect first.")]
    Busy,

    #[error("Please enter API URL to load data")]
    EmptyUrl,

    #[error("Invalid API URL '{0}': expected an absolute http(s) URL")]
    InvalidUrl(String),
}
