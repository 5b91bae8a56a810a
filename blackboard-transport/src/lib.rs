//! # Blackboard Transport
//!
//! Network transport for the blackboard arbiter.
//!
//! This crate provides:
//! - [`framing`] - A codec for fixed-width 32-bit value frames
//! - [`tcp`] - TCP listener, client connector and role handshake

pub mod error;
pub mod framing;
pub mod tcp;

pub use error::TransportError;
pub use framing::ValueCodec;
pub use tcp::{TcpClientConfig, TcpServer, TcpServerConfig, ValueConnection};
