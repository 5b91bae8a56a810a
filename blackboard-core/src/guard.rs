//! Guard predicates.
//!
//! A guard decides whether a role's request channel may be serviced given
//! the current cell values. Writers are guarded by the order between the two
//! cells; readers are edge-triggered on the value they were last given.

use crate::role::{Role, RoleKind, RoleSet};
use crate::wire::Value;

/// Returns true if the writer of `own` may write while the other cell holds `other`.
///
/// For any pair of cells at least one of the two writers passes this check,
/// so the interest set never loses both writers.
#[inline]
#[must_use]
pub const fn writer_may_write(own: Value, other: Value) -> bool {
    own <= other
}

/// Returns true if a reader whose last delivered value is `last` may read `current`.
///
/// `None` means nothing was delivered yet, which always allows a read.
#[inline]
#[must_use]
pub fn reader_may_read(current: Value, last: Option<Value>) -> bool {
    last != Some(current)
}

/// Evaluates the guard of a single role.
#[must_use]
pub fn eligible(role: Role, cells: [Value; 2], last_delivered: [Option<Value>; 2]) -> bool {
    let i = role.cell();
    match role.kind() {
        RoleKind::Writer => writer_may_write(cells[i], cells[1 - i]),
        RoleKind::Reader => reader_may_read(cells[i], last_delivered[i]),
    }
}

/// Evaluates all four guards and returns the roles that may be serviced.
#[must_use]
pub fn interest(cells: [Value; 2], last_delivered: [Option<Value>; 2]) -> RoleSet {
    Role::ALL
        .into_iter()
        .filter(|role| eligible(*role, cells, last_delivered))
        .collect()
}
