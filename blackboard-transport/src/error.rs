//! Error types for transport operations.

use thiserror::Error;

/// Error type for transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection timeout.
    #[error("connection timeout")]
    ConnectTimeout,

    /// Connection closed by the peer.
    #[error("connection closed")]
    ConnectionClosed,

    /// The stream ended in the middle of a frame.
    #[error("truncated frame: {buffered} of {expected} bytes received before end of stream")]
    TruncatedFrame {
        /// Bytes buffered when the stream ended.
        buffered: usize,
        /// Bytes in a complete frame.
        expected: usize,
    },

    /// Handshake failed.
    #[error("handshake error: {message}")]
    Handshake {
        /// Error message.
        message: String,
    },

    /// A frame could not be decoded.
    #[error("wire error: {0}")]
    Wire(#[from] blackboard_core::Error),
}

impl TransportError {
    /// Creates a truncated frame error.
    pub fn truncated_frame(buffered: usize, expected: usize) -> Self {
        Self::TruncatedFrame { buffered, expected }
    }

    /// Creates a handshake error.
    pub fn handshake(message: impl Into<String>) -> Self {
        Self::Handshake {
            message: message.into(),
        }
    }
}
