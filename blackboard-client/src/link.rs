//! Request/response links between a client role and the arbiter.

use crate::error::ClientError;
use blackboard_channel::ClientEnd;
use blackboard_core::{Role, RoleKind, Value};
use std::future::Future;

/// One client's single in-flight request/response cycle with the arbiter.
pub trait RoleLink {
    /// Role this link serves.
    fn role(&self) -> Role;

    /// Token the arbiter acknowledges writes with.
    fn ack_token(&self) -> Value;

    /// Sends one request and waits for the matching response.
    fn exchange(
        &mut self,
        request: Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

/// Link over an in-process duplex channel.
///
/// The exchange blocks the calling thread, so drive it from a runtime that
/// owns its thread.
pub struct LocalLink {
    role: Role,
    ack_token: Value,
    end: ClientEnd,
}

impl LocalLink {
    /// Wraps the client end of a role's duplex channel.
    #[must_use]
    pub fn new(role: Role, end: ClientEnd, ack_token: Value) -> Self {
        Self {
            role,
            ack_token,
            end,
        }
    }
}

impl RoleLink for LocalLink {
    fn role(&self) -> Role {
        self.role
    }

    fn ack_token(&self) -> Value {
        self.ack_token
    }

    async fn exchange(&mut self, request: Value) -> Result<Value, ClientError> {
        Ok(self.end.call(request)?)
    }
}

/// Fails with `WrongRole` unless the link's role is of the given kind.
pub(crate) fn ensure_kind<L: RoleLink>(
    link: &L,
    kind: RoleKind,
    operation: &'static str,
) -> Result<(), ClientError> {
    let role = link.role();
    if role.kind() == kind {
        Ok(())
    } else {
        Err(ClientError::WrongRole { role, operation })
    }
}
