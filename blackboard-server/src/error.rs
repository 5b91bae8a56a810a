//! Error types for server operations.
//!
//! Every variant is fatal to the arbiter: there is no retry and no
//! per-client isolation.

use blackboard_core::Role;
use thiserror::Error;

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] blackboard_transport::TransportError),

    /// A client's request channel closed.
    #[error("{role} request channel disconnected")]
    Disconnected {
        /// Role whose channel closed.
        role: Role,
    },

    /// Sending a response to a client failed.
    #[error("failed to respond to {role}: {message}")]
    Respond {
        /// Role that could not be answered.
        role: Role,
        /// Error message.
        message: String,
    },

    /// The channel registry is incomplete or a role was registered twice.
    #[error("channel registry error: {message}")]
    Registry {
        /// Error message.
        message: String,
    },

    /// A server task or the arbiter thread panicked or was cancelled.
    #[error("arbiter task failed: {message}")]
    Join {
        /// Error message.
        message: String,
    },
}

impl ServerError {
    /// Creates a registry error.
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Returns the role involved, if the error concerns one client.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Disconnected { role } | Self::Respond { role, .. } => Some(*role),
            _ => None,
        }
    }
}
