//! Connected client sessions.

use blackboard_core::Role;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

/// One registered network client.
#[derive(Debug, Clone)]
pub struct Session {
    /// Role the client announced.
    pub role: Role,
    /// Peer address.
    pub peer_addr: SocketAddr,
    /// Registration timestamp (nanos since epoch).
    pub connected_at: u64,
}

/// Registered sessions keyed by role. At most one session per role.
pub struct SessionTable {
    sessions: RwLock<HashMap<Role, Session>>,
}

impl SessionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a session. Returns false if the role is already taken.
    pub fn open(&self, role: Role, peer_addr: SocketAddr) -> bool {
        let mut sessions = self.sessions.write();
        if sessions.contains_key(&role) {
            return false;
        }
        let connected_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        sessions.insert(
            role,
            Session {
                role,
                peer_addr,
                connected_at,
            },
        );
        true
    }

    /// Removes the session of a role.
    pub fn close(&self, role: Role) -> Option<Session> {
        self.sessions.write().remove(&role)
    }

    /// Returns the session of a role.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<Session> {
        self.sessions.read().get(&role).cloned()
    }

    /// Returns true if the role has a session.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.sessions.read().contains_key(&role)
    }

    /// Returns the number of sessions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new()
    }
}
