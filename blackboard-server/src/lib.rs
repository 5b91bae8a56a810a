//! # Blackboard Server
//!
//! The arbiter that owns the two shared cells.
//!
//! This crate provides:
//! - [`Blackboard`] state and the guarded [`Arbiter`] service loop
//! - [`ArbiterBuilder`] for in-process wiring over crossbeam channels
//! - A TCP front end ([`Server`]) bridging network clients to the arbiter
//! - Session tracking for registered clients

pub mod arbiter;
pub mod board;
pub mod builder;
pub mod error;
pub mod registry;
pub mod responder;
pub mod server;
pub mod session;

pub use arbiter::{Arbiter, PassReport};
pub use board::Blackboard;
pub use builder::{ArbiterBuilder, LocalClients};
pub use error::ServerError;
pub use registry::{ChannelRegistry, Endpoint, RegistryBuilder};
pub use responder::{Responder, SendError};
pub use server::{Server, ServerBuilder};
pub use session::{Session, SessionTable};
