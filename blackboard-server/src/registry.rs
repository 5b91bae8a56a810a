//! Role to channel lookup, built once at startup.

use crate::error::ServerError;
use crate::responder::{Responder, SendError};
use blackboard_channel::{ChannelError, ServerEnd, ValueReceiver};
use blackboard_core::{Role, RoleSet, Value};

/// The arbiter's side of one client's channel pair.
pub struct Endpoint {
    requests: ValueReceiver,
    responder: Box<dyn Responder>,
}

impl Endpoint {
    /// Creates an endpoint from a request receiver and a responder.
    pub fn new(requests: ValueReceiver, responder: impl Responder + 'static) -> Self {
        Self {
            requests,
            responder: Box::new(responder),
        }
    }

    /// Creates an endpoint from the server half of an in-process duplex pair.
    #[must_use]
    pub fn local(end: ServerEnd) -> Self {
        let (requests, responses) = end.into_parts();
        Self::new(requests, responses)
    }

    /// Returns the request receiver.
    #[must_use]
    pub fn requests(&self) -> &ValueReceiver {
        &self.requests
    }

    /// Takes a pending request without blocking.
    ///
    /// # Errors
    /// Returns `Disconnected` if the client's request channel closed.
    #[inline]
    pub fn try_recv(&self) -> Result<Option<Value>, ChannelError> {
        self.requests.try_recv()
    }

    /// Sends a response frame.
    ///
    /// # Errors
    /// Returns error if the client's response channel is gone.
    #[inline]
    pub fn respond(&self, value: Value) -> Result<(), SendError> {
        self.responder.respond(value)
    }
}

/// Complete set of four endpoints, indexed by role.
pub struct ChannelRegistry {
    endpoints: [Endpoint; Role::COUNT],
}

impl ChannelRegistry {
    /// Returns the endpoint of a role.
    #[inline]
    #[must_use]
    pub fn get(&self, role: Role) -> &Endpoint {
        &self.endpoints[role.index()]
    }
}

/// Collects endpoints until every role has one.
#[derive(Default)]
pub struct RegistryBuilder {
    slots: [Option<Endpoint>; Role::COUNT],
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the endpoint of a role.
    ///
    /// # Errors
    /// Returns `Registry` if the role already has an endpoint.
    pub fn insert(&mut self, role: Role, endpoint: Endpoint) -> Result<(), ServerError> {
        let slot = &mut self.slots[role.index()];
        if slot.is_some() {
            return Err(ServerError::registry(format!("{role} registered twice")));
        }
        *slot = Some(endpoint);
        Ok(())
    }

    /// Returns true if the role already has an endpoint.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.slots[role.index()].is_some()
    }

    /// Returns the roles still lacking an endpoint.
    #[must_use]
    pub fn missing(&self) -> RoleSet {
        Role::ALL
            .into_iter()
            .filter(|role| !self.contains(*role))
            .collect()
    }

    /// Returns true once every role has an endpoint.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Builds the registry.
    ///
    /// # Errors
    /// Returns `Registry` naming the missing roles if the set is incomplete.
    pub fn build(self) -> Result<ChannelRegistry, ServerError> {
        let missing = self.missing();
        match self.slots {
            [Some(w0), Some(w1), Some(r0), Some(r1)] => Ok(ChannelRegistry {
                endpoints: [w0, w1, r0, r1],
            }),
            _ => Err(ServerError::registry(format!("missing {missing}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackboard_channel::duplex;

    fn local_endpoint() -> Endpoint {
        let (_client, server) = duplex::pair(1);
        Endpoint::local(server)
    }

    #[test]
    fn test_build_complete() {
        let mut builder = RegistryBuilder::new();
        for role in Role::ALL {
            builder.insert(role, local_endpoint()).unwrap();
        }
        assert!(builder.is_complete());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_incomplete() {
        let mut builder = RegistryBuilder::new();
        builder.insert(Role::Writer0, local_endpoint()).unwrap();
        builder.insert(Role::Reader1, local_endpoint()).unwrap();

        let missing = builder.missing();
        assert!(missing.contains(Role::Writer1));
        assert!(missing.contains(Role::Reader0));
        assert_eq!(missing.len(), 2);

        let err = builder.build().err().unwrap();
        assert_eq!(err.to_string(), "channel registry error: missing [W1 R0]");
    }

    #[test]
    fn test_insert_twice() {
        let mut builder = RegistryBuilder::new();
        builder.insert(Role::Reader0, local_endpoint()).unwrap();
        let err = builder.insert(Role::Reader0, local_endpoint()).unwrap_err();
        assert!(matches!(err, ServerError::Registry { .. }));
    }

    #[test]
    fn test_get_routes_by_role() {
        let (w0_client, w0_server) = duplex::pair(1);
        let mut builder = RegistryBuilder::new();
        builder.insert(Role::Writer0, Endpoint::local(w0_server)).unwrap();
        for role in [Role::Writer1, Role::Reader0, Role::Reader1] {
            builder.insert(role, local_endpoint()).unwrap();
        }
        let registry = builder.build().unwrap();

        w0_client.send_request(11).unwrap();
        assert_eq!(registry.get(Role::Writer0).try_recv(), Ok(Some(11)));

        registry.get(Role::Writer0).respond(1).unwrap();
        assert_eq!(w0_client.recv_response(), Ok(1));
    }
}
