//! # Blackboard Core
//!
//! Core types shared by the arbiter, its transports and its clients.
//!
//! This crate provides:
//! - [`Role`] and [`RoleSet`] - the fixed set of four client roles
//! - Guard predicates deciding which roles may be serviced
//! - The fixed-width wire format used on every channel
//! - Error types for decoding and role parsing

pub mod error;
pub mod guard;
pub mod role;
pub mod wire;

pub use error::{Error, Result};
pub use role::{Role, RoleKind, RoleSet};
pub use wire::{ACK, READ_REQUEST, Value};
