//! Error types for client operations.

use blackboard_core::{Role, Value};
use thiserror::Error;

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] blackboard_transport::TransportError),

    /// In-process channel error.
    #[error("channel error: {0}")]
    Channel(#[from] blackboard_channel::ChannelError),

    /// Operation not available to the link's role.
    #[error("{role} cannot {operation}")]
    WrongRole {
        /// Role of the link.
        role: Role,
        /// Attempted operation.
        operation: &'static str,
    },

    /// A writer got something other than the ack token back.
    #[error("expected ack {expected}, got {actual}")]
    UnexpectedAck {
        /// Token announced at start.
        expected: Value,
        /// Value received.
        actual: Value,
    },

    /// Invalid loop configuration.
    #[error("invalid configuration: {message}")]
    Config {
        /// Error message.
        message: String,
    },
}

impl ClientError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_role_display() {
        let err = ClientError::WrongRole {
            role: Role::Reader0,
            operation: "write",
        };
        assert_eq!(err.to_string(), "R0 cannot write");
    }

    #[test]
    fn test_unexpected_ack_display() {
        let err = ClientError::UnexpectedAck {
            expected: 1,
            actual: 7,
        };
        assert_eq!(err.to_string(), "expected ack 1, got 7");
    }

    #[test]
    fn test_channel_from() {
        let err: ClientError = blackboard_channel::ChannelError::Disconnected.into();
        assert_eq!(err.to_string(), "channel error: channel disconnected");
    }
}
