//! TCP transport module.
//!
//! Provides a TCP listener and client connector carrying fixed-width value
//! frames, plus the role handshake run before the arbiter starts.

pub mod client;
pub mod connection;
pub mod handshake;
pub mod server;

pub use client::{TcpClientConfig, connect};
pub use connection::ValueConnection;
pub use server::{TcpServer, TcpServerConfig};
