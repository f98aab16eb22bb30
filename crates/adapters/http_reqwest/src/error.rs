//! HTTP adapter error types.

use std::time::Duration;

use armpanel_domain::error::TransportError;

/// Errors specific to the HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The `reqwest` client could not be built.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The request could not be sent or its body could not be read.
    #[error("HTTP request failed")]
    Request(#[source] reqwest::Error),

    /// The response body was not JSON.
    #[error("response body is not valid JSON")]
    Decode(#[source] serde_json::Error),
}

impl HttpError {
    /// Convert into a [`TransportError`] for propagation across the port
    /// boundary. `timeout` is the bound the client was configured with.
    #[must_use]
    pub fn into_transport(self, timeout: Duration) -> TransportError {
        match self {
            Self::Request(ref err) if err.is_timeout() => TransportError::Timeout { after: timeout },
            other => TransportError::connection(other),
        }
    }
}
