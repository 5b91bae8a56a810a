//! Error types for blackboard core operations.

use thiserror::Error;

/// Core error type for blackboard operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer is too short to hold a wire value.
    #[error("buffer too short: required {required} bytes, available {available} bytes")]
    BufferTooShort {
        /// Required buffer size in bytes.
        required: usize,
        /// Available buffer size in bytes.
        available: usize,
    },

    /// A role code or name does not name one of the four roles.
    #[error("invalid role: {input}")]
    InvalidRole {
        /// The rejected input, as received.
        input: String,
    },
}

impl Error {
    /// Creates an invalid role error.
    pub fn invalid_role(input: impl Into<String>) -> Self {
        Self::InvalidRole {
            input: input.into(),
        }
    }
}

/// Result type alias for blackboard core operations.
pub type Result<T> = std::result::Result<T, Error>;
