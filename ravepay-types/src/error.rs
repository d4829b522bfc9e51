//! Error types for the charge client.

use crate::config::Operation;

/// Failures raised by a [`Transport`](crate::ports::Transport) before any
/// response body is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Request(String),
}

/// Configuration errors (bad environment values, missing credentials).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid mode: {0} (expected \"test\" or \"live\")")]
    InvalidMode(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("{0:?} needs a secret key; set RAVE_SECRET_KEY")]
    MissingSecretKey(Operation),
}

/// Errors returned by the gateway calls.
///
/// A gateway response with coarse status `"error"` is NOT represented here:
/// it decodes into an ordinary response value.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Gateway returned an undecodable body: {0}")]
    Protocol(#[source] serde_json::Error),

    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// Returns true if the error came from the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Returns true if the gateway answered with a body the client could not decode.
    pub fn is_protocol(&self) -> bool {
        matches!(self, ClientError::Protocol(_))
    }
}
