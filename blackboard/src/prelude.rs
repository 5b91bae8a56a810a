//! Prelude module for convenient imports.
//!
//! ```ignore
//! use blackboard::prelude::*;
//! ```

// Core types
pub use blackboard_core::{ACK, READ_REQUEST, Role, RoleKind, RoleSet, Value};

// Channel types
pub use blackboard_channel::{ChannelError, ClientEnd, DuplexChannel, ServerEnd};

// Server types
pub use blackboard_server::{
    Arbiter, ArbiterBuilder, Blackboard, LocalClients, PassReport, Server, ServerBuilder,
    ServerError,
};

// Client types
pub use blackboard_client::{
    ClientBuilder, ClientError, LocalLink, ReaderConfig, RoleLink, TcpLink, WriterConfig,
};
