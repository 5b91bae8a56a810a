//! The arbiter event loop.
//!
//! One service pass:
//! 1. evaluate the four guards against the current cells,
//! 2. watch the request channels of the eligible roles,
//! 3. block until at least one of them has a request,
//! 4. service every watched channel holding a request, in priority order
//!    `W0, W1, R0, R1`.
//!
//! Guards are evaluated once per pass. A write serviced early in a pass is
//! visible to a reader serviced later in the same pass, but a role left out
//! of the interest set is not reconsidered until the next pass.

use crate::board::Blackboard;
use crate::error::ServerError;
use crate::registry::ChannelRegistry;
use blackboard_core::{Role, RoleKind, RoleSet, Value};
use crossbeam_channel::Select;
use std::convert::Infallible;

/// Outcome of one service pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Sequence number of the pass, starting at 1.
    pub pass: u64,
    /// Roles whose channels were watched.
    pub interest: RoleSet,
    /// Roles that were serviced.
    pub serviced: RoleSet,
    /// Cell values after the pass.
    pub cells: [Value; 2],
}

/// Single authority over the two cells.
pub struct Arbiter {
    board: Blackboard,
    registry: ChannelRegistry,
    ack_token: Value,
    passes: u64,
}

impl Arbiter {
    /// Creates an arbiter over a complete registry.
    #[must_use]
    pub fn new(board: Blackboard, registry: ChannelRegistry, ack_token: Value) -> Self {
        Self {
            board,
            registry,
            ack_token,
            passes: 0,
        }
    }

    /// Returns a read-only view of the shared state.
    #[must_use]
    pub fn board(&self) -> &Blackboard {
        &self.board
    }

    /// Returns the number of completed passes.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Returns the token sent to writers after each stored value.
    #[must_use]
    pub fn ack_token(&self) -> Value {
        self.ack_token
    }

    /// Runs service passes until a channel fails.
    ///
    /// # Errors
    /// Returns the first channel failure. There is no other way out.
    pub fn run(&mut self) -> Result<Infallible, ServerError> {
        let [c0, c1] = self.board.cells();
        tracing::info!("Blackboard started. State: [{}, {}]", c0, c1);

        loop {
            if let Err(e) = self.step() {
                tracing::error!(pass = self.passes + 1, "Arbiter stopped: {}", e);
                return Err(e);
            }
        }
    }

    /// Performs exactly one service pass, blocking until some eligible
    /// client has a request. The returned report never has an empty
    /// `serviced` set.
    ///
    /// # Errors
    /// Returns `Disconnected` if a watched request channel closed, or
    /// `Respond` if a response could not be delivered.
    pub fn step(&mut self) -> Result<PassReport, ServerError> {
        let interest = self.board.interest();
        debug_assert!(interest.has_writer(), "no writer eligible at {:?}", self.board);
        tracing::trace!(pass = self.passes + 1, %interest, "waiting");

        let mut serviced = RoleSet::empty();
        // `Select::ready` may wake spuriously; nothing changed, so wait again.
        while serviced.is_empty() {
            self.wait(interest);
            for role in interest.iter() {
                let request = self
                    .registry
                    .get(role)
                    .try_recv()
                    .map_err(|_| ServerError::Disconnected { role })?;
                if let Some(request) = request {
                    self.service(role, request)?;
                    serviced.insert(role);
                }
            }
        }

        self.passes += 1;
        Ok(PassReport {
            pass: self.passes,
            interest,
            serviced,
            cells: self.board.cells(),
        })
    }

    /// Blocks until a watched channel has a request or has closed.
    fn wait(&self, interest: RoleSet) {
        let mut select = Select::new();
        for role in interest.iter() {
            select.recv(self.registry.get(role).requests().as_select());
        }
        select.ready();
    }

    fn service(&mut self, role: Role, request: Value) -> Result<(), ServerError> {
        let index = role.cell();
        match role.kind() {
            RoleKind::Writer => {
                self.board.write(index, request);
                self.respond(role, self.ack_token)?;
                let [c0, c1] = self.board.cells();
                tracing::info!("{} wrote {}. State: [{}, {}]", role, request, c0, c1);
            }
            RoleKind::Reader => {
                let value = self.board.cell(index);
                self.respond(role, value)?;
                self.board.mark_delivered(index);
                tracing::debug!("{} delivered {}", role, value);
            }
        }
        Ok(())
    }

    fn respond(&self, role: Role, value: Value) -> Result<(), ServerError> {
        self.registry
            .get(role)
            .respond(value)
            .map_err(|e| ServerError::Respond {
                role,
                message: e.message,
            })
    }
}
