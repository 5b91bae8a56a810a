//! Response path back to a client.

use blackboard_channel::ValueSender;
use blackboard_core::Value;

/// Sends response frames to one client.
///
/// Implementations may block: a client that stops draining its responses
/// stalls the arbiter, and with it every other client.
pub trait Responder: Send {
    /// Sends one response frame.
    ///
    /// # Errors
    /// Returns error if the client's response channel is gone.
    fn respond(&self, value: Value) -> Result<(), SendError>;
}

/// Error type for response sends.
#[derive(Debug, Clone)]
pub struct SendError {
    /// Error message.
    pub message: String,
}

impl SendError {
    /// Creates a new send error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "send error: {}", self.message)
    }
}

impl std::error::Error for SendError {}

/// In-process clients are answered over a bounded channel; the send blocks
/// while the client's response queue is full.
impl Responder for ValueSender {
    fn respond(&self, value: Value) -> Result<(), SendError> {
        self.send(value).map_err(|e| SendError::new(e.to_string()))
    }
}
