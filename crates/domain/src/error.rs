//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.

use std::time::Duration;

/// Failure of a single request against the device.
///
/// Only two kinds exist: the bounded wait expired, or anything else went
/// wrong on the way (refused connection, reset, unparsable body, …).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within the configured wait and was aborted.
    #[error("request timed out after {}ms", .after.as_millis())]
    Timeout {
        /// The wait bound that was exceeded.
        after: Duration,
    },

    /// Any other network-level failure, including malformed responses.
    #[error("connection failure")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wrap an arbitrary error as a connection failure.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Box::new(err))
    }

    /// Whether this failure is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("step size must be greater than zero")]
    ZeroStepSize,
}

/// Failure to interpret user input as a domain value.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown {kind} {value:?}")]
    UnknownVariant {
        /// Which value was being parsed (e.g. "jog direction").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    #[error("expected an integer, got {0:?}")]
    NotAnInteger(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_timeout_with_millis() {
        let err = TransportError::Timeout {
            after: Duration::from_millis(3000),
        };
        assert_eq!(err.to_string(), "request timed out after 3000ms");
        assert!(err.is_timeout());
    }

    #[test]
    fn should_keep_source_of_connection_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TransportError::connection(io);
        assert!(!err.is_timeout());
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn should_display_unknown_variant() {
        let err = ParseError::UnknownVariant {
            kind: "jog direction",
            value: "sideways".to_string(),
        };
        assert_eq!(err.to_string(), "unknown jog direction \"sideways\"");
    }
}
