//! The two shared cells and their delivery markers.
//!
//! Only the arbiter holds a `Blackboard` it can mutate; everything outside
//! this crate gets a shared reference at most.

use blackboard_core::guard;
use blackboard_core::{Role, RoleSet, Value};

/// Shared state mediated by the arbiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blackboard {
    cells: [Value; 2],
    last_delivered: [Option<Value>; 2],
}

impl Blackboard {
    /// Creates a board with both cells at zero and nothing delivered.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cells([0, 0])
    }

    /// Creates a board with the given starting cell values and nothing delivered.
    #[must_use]
    pub fn with_cells(cells: [Value; 2]) -> Self {
        Self {
            cells,
            last_delivered: [None, None],
        }
    }

    /// Returns the value of a cell.
    ///
    /// # Panics
    /// Panics if `index` is not 0 or 1.
    #[inline]
    #[must_use]
    pub fn cell(&self, index: usize) -> Value {
        self.cells[index]
    }

    /// Returns both cells.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> [Value; 2] {
        self.cells
    }

    /// Returns the value last delivered to the reader of a cell, if any.
    ///
    /// # Panics
    /// Panics if `index` is not 0 or 1.
    #[inline]
    #[must_use]
    pub fn last_delivered(&self, index: usize) -> Option<Value> {
        self.last_delivered[index]
    }

    /// Returns true if the role's guard currently holds.
    #[must_use]
    pub fn eligible(&self, role: Role) -> bool {
        guard::eligible(role, self.cells, self.last_delivered)
    }

    /// Returns every role whose guard currently holds.
    #[must_use]
    pub fn interest(&self) -> RoleSet {
        guard::interest(self.cells, self.last_delivered)
    }

    pub(crate) fn write(&mut self, index: usize, value: Value) {
        self.cells[index] = value;
    }

    /// Records that the reader of `index` has seen the current value and returns it.
    pub(crate) fn mark_delivered(&mut self, index: usize) -> Value {
        let value = self.cells[index];
        self.last_delivered[index] = Some(value);
        value
    }
}

impl Default for Blackboard {
    fn default() -> Self {
        Self::new()
    }
}
