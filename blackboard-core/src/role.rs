//! Client roles and role sets.
//!
//! The arbiter serves exactly four clients, each identified by a [`Role`].
//! The declaration order of the variants is the service priority order.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Whether a role mutates its cell or observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    /// Sends new cell values and waits for an acknowledgment.
    Writer,
    /// Polls for the current cell value.
    Reader,
}

/// One of the four statically known clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Writes cell 0.
    Writer0,
    /// Writes cell 1.
    Writer1,
    /// Reads cell 0.
    Reader0,
    /// Reads cell 1.
    Reader1,
}

impl Role {
    /// All roles in service priority order.
    pub const ALL: [Role; 4] = [Role::Writer0, Role::Writer1, Role::Reader0, Role::Reader1];

    /// Number of roles.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the dense index of this role (`0..4`), equal to its priority rank.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the index of the cell this role writes or reads.
    #[inline]
    #[must_use]
    pub const fn cell(self) -> usize {
        match self {
            Self::Writer0 | Self::Reader0 => 0,
            Self::Writer1 | Self::Reader1 => 1,
        }
    }

    /// Returns whether this role writes or reads.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> RoleKind {
        match self {
            Self::Writer0 | Self::Writer1 => RoleKind::Writer,
            Self::Reader0 | Self::Reader1 => RoleKind::Reader,
        }
    }

    /// Returns true for writer roles.
    #[inline]
    #[must_use]
    pub const fn is_writer(self) -> bool {
        matches!(self.kind(), RoleKind::Writer)
    }

    /// Returns the code a client sends in its handshake frame.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Parses a handshake code.
    ///
    /// # Errors
    /// Returns `InvalidRole` if the code is outside `0..4`.
    pub fn from_code(code: i32) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| Error::invalid_role(code.to_string()))
    }

    /// Returns the short name used in logs (`W0`, `W1`, `R0`, `R1`).
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Writer0 => "W0",
            Self::Writer1 => "W1",
            Self::Reader0 => "R0",
            Self::Reader1 => "R1",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Role {
    type Err = Error;

    /// Accepts `w0`, `writer0`, `r1`, `reader1` and so on, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "w0" | "writer0" => Ok(Self::Writer0),
            "w1" | "writer1" => Ok(Self::Writer1),
            "r0" | "reader0" => Ok(Self::Reader0),
            "r1" | "reader1" => Ok(Self::Reader1),
            _ => Err(Error::invalid_role(s)),
        }
    }
}

/// A set of roles, iterated in priority order.
///
/// This is the arbiter's interest set: the roles whose request channels
/// are watched during one service pass.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet {
    bits: u8,
}

impl RoleSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Creates a set holding every role.
    #[must_use]
    pub const fn all() -> Self {
        Self { bits: 0b1111 }
    }

    /// Adds a role to the set.
    #[inline]
    pub fn insert(&mut self, role: Role) {
        self.bits |= 1 << role.index();
    }

    /// Removes a role from the set.
    #[inline]
    pub fn remove(&mut self, role: Role) {
        self.bits &= !(1 << role.index());
    }

    /// Returns true if the role is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(&self, role: Role) -> bool {
        self.bits & (1 << role.index()) != 0
    }

    /// Returns the number of roles in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns true if at least one writer role is in the set.
    #[inline]
    #[must_use]
    pub const fn has_writer(&self) -> bool {
        self.contains(Role::Writer0) || self.contains(Role::Writer1)
    }

    /// Iterates over the roles in priority order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = Self::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, role) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{role}")?;
        }
        f.write_str("]")
    }
}
