//! # Blackboard Client
//!
//! Client side of the blackboard arbiter.
//!
//! This crate provides:
//! - The [`RoleLink`] request/response abstraction with in-process and TCP links
//! - Client builder for network connections
//! - Writer and reader loops

pub mod error;
pub mod link;
pub mod reader;
pub mod tcp;
pub mod writer;

pub use error::ClientError;
pub use link::{LocalLink, RoleLink};
pub use reader::ReaderConfig;
pub use tcp::{ClientBuilder, TcpLink};
pub use writer::WriterConfig;
