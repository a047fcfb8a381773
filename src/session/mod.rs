// src/session/mod.rs — Connection lifecycle: connect/disconnect state machine.
//
// The controller never performs I/O itself. `connect` hands back a
// `LoadTicket`; whoever owns the event loop runs the load and feeds the
// outcome to `complete_load`. Tickets carry the epoch they were issued under,
// so a completion that arrives after a disconnect or a newer connect is a
// no-op.

use serde::Serialize;

use crate::client::types::Dataset;
use crate::infra::errors::{ConnectRejected, LoadError};

/// Trim whitespace and strip every trailing `/`.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Flat status, as shown on the connection badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Disconnected,
    Loading,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Loading => "loading",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The session. Each variant carries exactly the data valid in that state,
/// so a dataset only exists while connected and an error only while failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Loading {
        base_url: String,
    },
    Connected {
        base_url: String,
        dataset: Dataset,
    },
    Error {
        base_url: String,
        error: LoadError,
    },
}

impl ConnectionState {
    pub fn status(&self) -> ConnectionStatus {
        match self {
            ConnectionState::Disconnected => ConnectionStatus::Disconnected,
            ConnectionState::Loading { .. } => ConnectionStatus::Loading,
            ConnectionState::Connected { .. } => ConnectionStatus::Connected,
            ConnectionState::Error { .. } => ConnectionStatus::Error,
        }
    }

    /// Normalized base URL; empty when disconnected.
    pub fn base_url(&self) -> &str {
        match self {
            ConnectionState::Disconnected => "",
            ConnectionState::Loading { base_url }
            | ConnectionState::Connected { base_url, .. }
            | ConnectionState::Error { base_url, .. } => base_url,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            ConnectionState::Connected { dataset, .. } => Some(dataset),
            _ => None,
        }
    }

    /// Non-empty only in the error state.
    pub fn error_message(&self) -> String {
        match self {
            ConnectionState::Error { error, .. } => error.to_string(),
            _ => String::new(),
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            ConnectionState::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether the URL input accepts a new connect request.
    pub fn accepts_connect(&self) -> bool {
        matches!(
            self,
            ConnectionState::Disconnected | ConnectionState::Error { .. }
        )
    }
}

/// A data load the caller must perform on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub epoch: u64,
    pub base_url: String,
}

#[derive(Debug, Default)]
pub struct Controller {
    state: ConnectionState,
    epoch: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn status(&self) -> ConnectionStatus {
        self.state.status()
    }

    /// Current session epoch. Advances on every connect and disconnect.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Start a connection attempt. Only allowed from `disconnected` or `error`.
    pub fn connect(&mut self, raw_url: &str) -> Result<LoadTicket, ConnectRejected> {
        if !self.state.accepts_connect() {
            return Err(ConnectRejected::Busy);
        }

        let base_url = normalize_base_url(raw_url);
        if base_url.is_empty() {
            return Err(ConnectRejected::EmptyUrl);
        }
        validate_base_url(&base_url)?;

        self.epoch += 1;
        self.state = ConnectionState::Loading {
            base_url: base_url.clone(),
        };
        tracing::info!(epoch = self.epoch, "Connecting to {}", base_url);

        Ok(LoadTicket {
            epoch: self.epoch,
            base_url,
        })
    }

    /// Apply a load outcome. Returns `false` when the ticket is stale and the
    /// outcome was discarded.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Dataset, LoadError>,
    ) -> bool {
        let current = matches!(
            &self.state,
            ConnectionState::Loading { base_url } if ticket.epoch == self.epoch && *base_url == ticket.base_url
        );
        if !current {
            tracing::debug!(
                ticket_epoch = ticket.epoch,
                current_epoch = self.epoch,
                "Discarding stale load for {}",
                ticket.base_url
            );
            return false;
        }

        let base_url = ticket.base_url.clone();
        self.state = match result {
            Ok(dataset) => {
                tracing::info!(
                    features = dataset.feature_importances.len(),
                    points = dataset.scatter_points.len(),
                    "Connected to {}",
                    base_url
                );
                ConnectionState::Connected { base_url, dataset }
            }
            Err(error) => {
                tracing::warn!(kind = error.kind(), "Connection error: {}", error);
                ConnectionState::Error { base_url, error }
            }
        };
        true
    }

    /// Return to the initial state from anywhere. Any in-flight load becomes stale.
    pub fn disconnect(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        self.epoch += 1;
        self.state = ConnectionState::Disconnected;
        tracing::info!(epoch = self.epoch, "Disconnected");
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ConnectRejected> {
    match url::Url::parse(base_url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") && u.host_str().is_some() => Ok(()),
        _ => Err(ConnectRejected::InvalidUrl(base_url.to_string())),
    }
}
