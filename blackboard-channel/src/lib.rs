//! # Blackboard Channel
//!
//! In-process channel abstractions for talking to the arbiter.
//!
//! This crate provides:
//! - [`value`] - Bounded single-value channels that can join a select
//! - [`duplex`] - Request/response channel pairs, one per client role

pub mod duplex;
pub mod value;

pub use duplex::{ClientEnd, DuplexChannel, ServerEnd};
pub use value::{ValueChannel, ValueReceiver, ValueSender};

/// Error type for channel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The other end of the channel was dropped.
    Disconnected,
    /// Channel is full.
    Full,
    /// Operation timed out.
    Timeout,
}

impl std::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "channel disconnected"),
            Self::Full => write!(f, "channel full"),
            Self::Timeout => write!(f, "operation timed out"),
        }
    }
}

impl std::error::Error for ChannelError {}
