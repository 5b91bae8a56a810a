//! Arbiter builder and in-process wiring.

use crate::arbiter::Arbiter;
use crate::board::Blackboard;
use crate::error::ServerError;
use crate::registry::{ChannelRegistry, Endpoint, RegistryBuilder};
use blackboard_channel::{ClientEnd, DuplexChannel};
use blackboard_core::{ACK, Role, Value};

/// Builder for configuring and creating an arbiter.
#[derive(Debug, Clone)]
pub struct ArbiterBuilder {
    ack_token: Value,
    channel_capacity: usize,
    initial_cells: [Value; 2],
}

impl ArbiterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ack_token: ACK,
            channel_capacity: 1,
            initial_cells: [0, 0],
        }
    }

    /// Sets the token sent to a writer after each stored value.
    #[must_use]
    pub fn ack_token(mut self, token: Value) -> Self {
        self.ack_token = token;
        self
    }

    /// Sets the capacity of each in-process channel direction.
    #[must_use]
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Sets the starting cell values.
    #[must_use]
    pub fn initial_cells(mut self, cells: [Value; 2]) -> Self {
        self.initial_cells = cells;
        self
    }

    /// Returns the configured ack token.
    #[must_use]
    pub fn token(&self) -> Value {
        self.ack_token
    }

    /// Builds an arbiter over an already complete registry.
    #[must_use]
    pub fn build(&self, registry: ChannelRegistry) -> Arbiter {
        Arbiter::new(
            Blackboard::with_cells(self.initial_cells),
            registry,
            self.ack_token,
        )
    }

    /// Builds an arbiter wired to four in-process duplex channels and hands
    /// back the client halves.
    ///
    /// # Errors
    /// Returns `Registry` if the registry cannot be completed.
    pub fn local(&self) -> Result<(Arbiter, LocalClients), ServerError> {
        let mut registry = RegistryBuilder::new();
        let mut clients = LocalClients::default();

        for role in Role::ALL {
            let (client, server) = DuplexChannel::bounded(self.channel_capacity);
            registry.insert(role, Endpoint::local(server))?;
            clients.ends[role.index()] = Some(client);
        }

        Ok((self.build(registry.build()?), clients))
    }
}

impl Default for ArbiterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client halves of the in-process channels, one per role.
#[derive(Default)]
pub struct LocalClients {
    ends: [Option<ClientEnd>; Role::COUNT],
}

impl LocalClients {
    /// Takes the client end of a role. Returns `None` if already taken.
    pub fn take(&mut self, role: Role) -> Option<ClientEnd> {
        self.ends[role.index()].take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = ArbiterBuilder::default();
        assert_eq!(builder.token(), ACK);
        assert_eq!(builder.channel_capacity, 1);
        assert_eq!(builder.initial_cells, [0, 0]);
    }

    #[test]
    fn test_builder_options() {
        let builder = ArbiterBuilder::new()
            .ack_token(5)
            .channel_capacity(8)
            .initial_cells([4, 2]);
        assert_eq!(builder.token(), 5);

        let (arbiter, _clients) = builder.local().unwrap();
        assert_eq!(arbiter.ack_token(), 5);
        assert_eq!(arbiter.board().cells(), [4, 2]);
        assert_eq!(arbiter.passes(), 0);
    }

    #[test]
    fn test_take_each_role_once() {
        let (_arbiter, mut clients) = ArbiterBuilder::new().local().unwrap();
        for role in Role::ALL {
            assert!(clients.take(role).is_some());
            assert!(clients.take(role).is_none());
        }
    }
}
