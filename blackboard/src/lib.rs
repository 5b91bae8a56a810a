//! # Blackboard
//!
//! A single arbiter owning two integer cells, serving two writers and two
//! readers through guarded, prioritized request/response channels.
//!
//! - A writer may store into its cell only while its value does not exceed
//!   the other cell's value.
//! - A reader is answered only once its cell holds a value it has not been
//!   given yet.
//! - Each pass services every eligible pending request in the order
//!   `W0, W1, R0, R1`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use blackboard::prelude::*;
//!
//! let (mut arbiter, mut clients) = ArbiterBuilder::new().local()?;
//! let w0 = clients.take(Role::Writer0).unwrap();
//!
//! w0.send_request(3)?;
//! let report = arbiter.step()?;
//! assert_eq!(report.cells, [3, 0]);
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Roles, guards and wire format
//! - [`channel`] - In-process duplex channels
//! - [`transport`] - Value framing and TCP
//! - [`server`] - The arbiter and its TCP front end
//! - [`client`] - Writer and reader loops

pub mod logging;
pub mod prelude;

/// Roles, guards and wire format.
pub mod core {
    pub use blackboard_core::*;
}

/// In-process duplex channels.
pub mod channel {
    pub use blackboard_channel::*;
}

/// Value framing and TCP.
pub mod transport {
    pub use blackboard_transport::*;
}

/// The arbiter and its TCP front end.
pub mod server {
    pub use blackboard_server::*;
}

/// Writer and reader loops.
pub mod client {
    pub use blackboard_client::*;
}
