//! Role handshake.
//!
//! A client opens its connection by sending its role code as a single frame.
//! It then waits for one start frame, which the arbiter sends to every client
//! once all four roles are registered. Only after that do request frames flow.

use super::connection::ValueConnection;
use crate::error::TransportError;
use blackboard_core::{Role, Value};

/// Client side: announces the role this connection serves.
///
/// # Errors
/// Returns `TransportError` if the write fails.
pub async fn announce(conn: &mut ValueConnection, role: Role) -> Result<(), TransportError> {
    conn.send(role.code()).await
}

/// Client side: waits for the start frame.
///
/// # Errors
/// Returns `ConnectionClosed` if the arbiter rejected the role and closed
/// the connection, or any receive error.
pub async fn await_start(conn: &mut ValueConnection) -> Result<Value, TransportError> {
    conn.recv_required().await
}

/// Server side: reads and validates the role code.
///
/// # Errors
/// Returns `Handshake` for an unknown role code, or any receive error.
pub async fn read_role(conn: &mut ValueConnection) -> Result<Role, TransportError> {
    let code = conn.recv_required().await?;
    Role::from_code(code).map_err(|e| TransportError::handshake(e.to_string()))
}

/// Server side: releases a registered client.
///
/// # Errors
/// Returns `TransportError` if the write fails.
pub async fn start(conn: &mut ValueConnection, token: Value) -> Result<(), TransportError> {
    conn.send(token).await
}
