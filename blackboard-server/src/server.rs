//! TCP front end for the arbiter.
//!
//! The server runs in two phases. During registration it accepts connections
//! and reads one role frame from each concurrently, rejecting unknown or
//! duplicate roles, until all four roles are held. A client that disconnects
//! in this phase gives its role up. The server then sends the start frame to
//! every client, spawns one bridge task per connection and hands the registry
//! to the arbiter, which runs on a blocking thread until a channel fails.
//!
//! A bridge forwards one request frame at a time into the arbiter's request
//! channel and writes back the single response before reading the next frame.

use crate::builder::ArbiterBuilder;
use crate::error::ServerError;
use crate::registry::{Endpoint, RegistryBuilder};
use crate::responder::{Responder, SendError};
use crate::session::SessionTable;
use blackboard_channel::value::{self, ValueSender};
use blackboard_core::{Role, Value};
use blackboard_transport::tcp::handshake;
use blackboard_transport::{TcpServer, TcpServerConfig, ValueConnection};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc as tokio_mpsc;
use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};

/// Builder for configuring and creating a server.
#[derive(Debug, Clone)]
pub struct ServerBuilder {
    tcp: TcpServerConfig,
    handshake_timeout: Duration,
    arbiter: ArbiterBuilder,
}

impl ServerBuilder {
    /// Creates a new server builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tcp: TcpServerConfig::default(),
            handshake_timeout: Duration::from_secs(10),
            arbiter: ArbiterBuilder::new(),
        }
    }

    /// Sets the bind address.
    #[must_use]
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.tcp.bind_addr = addr;
        self
    }

    /// Sets TCP_NODELAY on accepted connections.
    #[must_use]
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp.tcp_nodelay = enabled;
        self
    }

    /// Sets how long a new connection may take to send its role frame.
    #[must_use]
    pub fn handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    /// Sets the arbiter configuration.
    #[must_use]
    pub fn arbiter(mut self, arbiter: ArbiterBuilder) -> Self {
        self.arbiter = arbiter;
        self
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        Server {
            tcp: self.tcp,
            handshake_timeout: self.handshake_timeout,
            arbiter: self.arbiter,
            sessions: Arc::new(SessionTable::new()),
        }
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The arbiter process.
pub struct Server {
    tcp: TcpServerConfig,
    handshake_timeout: Duration,
    arbiter: ArbiterBuilder,
    sessions: Arc<SessionTable>,
}

impl Server {
    /// Returns the table of registered clients.
    #[must_use]
    pub fn sessions(&self) -> Arc<SessionTable> {
        Arc::clone(&self.sessions)
    }

    /// Binds the configured address and serves.
    ///
    /// # Errors
    /// Returns `ServerError` if binding fails or once the arbiter stops.
    pub async fn run(&self) -> Result<Infallible, ServerError> {
        let listener = TcpServer::bind(self.tcp.clone()).await?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener.
    ///
    /// # Errors
    /// Returns an accept or start frame failure, or the error that stopped
    /// the arbiter.
    pub async fn serve(&self, listener: TcpServer) -> Result<Infallible, ServerError> {
        tracing::info!("Blackboard listening on {}", listener.local_addr()?);

        let clients = self.register(&listener).await?;
        drop(listener);

        let token = self.arbiter.token();
        let mut registry = RegistryBuilder::new();
        for (role, mut conn) in clients {
            handshake::start(&mut conn, token).await?;

            let (request_tx, request_rx) = value::channel(1);
            let (response_tx, response_rx) = tokio_mpsc::unbounded_channel();
            registry.insert(
                role,
                Endpoint::new(request_rx, SessionResponder { tx: response_tx }),
            )?;

            let sessions = Arc::clone(&self.sessions);
            tokio::spawn(async move {
                bridge(role, conn, request_tx, response_rx).await;
                sessions.close(role);
            });
        }

        let mut arbiter = self.arbiter.build(registry.build()?);
        tracing::info!("All roles registered, starting arbiter");

        tokio::task::spawn_blocking(move || arbiter.run())
            .await
            .map_err(|e| ServerError::Join {
                message: e.to_string(),
            })?
    }

    /// Accepts connections until every role is held by one of them.
    ///
    /// Role frames are read concurrently, each under its own timeout. A
    /// registered client that goes away before the start frame frees its
    /// role again.
    async fn register(
        &self,
        listener: &TcpServer,
    ) -> Result<Vec<(Role, ValueConnection)>, ServerError> {
        let mut handshakes = JoinSet::new();
        let mut held: HashMap<Role, Holder> = HashMap::with_capacity(Role::COUNT);
        let (departed_tx, mut departed_rx) = tokio_mpsc::unbounded_channel();

        loop {
            if held.len() == Role::COUNT {
                let ready = self.release(&mut held).await?;
                if ready.len() == Role::COUNT {
                    return Ok(ready);
                }
                for (role, conn) in ready {
                    held.insert(role, Holder::spawn(role, conn, departed_tx.clone()));
                }
                continue;
            }

            tokio::select! {
                accepted = listener.accept() => {
                    let mut conn = accepted?;
                    let timeout = self.handshake_timeout;
                    handshakes.spawn(async move {
                        let role = match tokio::time::timeout(
                            timeout,
                            handshake::read_role(&mut conn),
                        )
                        .await
                        {
                            Ok(Ok(role)) => Ok(role),
                            Ok(Err(e)) => Err(e.to_string()),
                            Err(_) => Err(format!("no role frame within {timeout:?}")),
                        };
                        (conn, role)
                    });
                }
                Some(joined) = handshakes.join_next(), if !handshakes.is_empty() => {
                    let (conn, role) = match joined {
                        Ok(handshake) => handshake,
                        Err(e) => {
                            tracing::error!("Handshake task failed: {}", e);
                            continue;
                        }
                    };
                    let peer = conn.peer_addr();
                    let role = match role {
                        Ok(role) => role,
                        Err(reason) => {
                            tracing::warn!("Rejecting {}: {}", peer, reason);
                            continue;
                        }
                    };

                    if !self.sessions.open(role, peer) {
                        tracing::warn!("Rejecting {}: {} already registered", peer, role);
                        continue;
                    }

                    tracing::info!("{} registered from {}", role, peer);
                    held.insert(role, Holder::spawn(role, conn, departed_tx.clone()));
                }
                Some((role, peer)) = departed_rx.recv() => {
                    // Stale notices from an earlier holder of the role are ignored.
                    if held.get(&role).is_some_and(|holder| holder.peer == peer) {
                        held.remove(&role);
                        self.sessions.close(role);
                    }
                }
            }
        }
    }

    /// Takes every held connection back. Roles whose client left meanwhile
    /// are unregistered and missing from the result.
    async fn release(
        &self,
        held: &mut HashMap<Role, Holder>,
    ) -> Result<Vec<(Role, ValueConnection)>, ServerError> {
        let mut ready = Vec::with_capacity(Role::COUNT);
        for (role, holder) in held.drain() {
            let _ = holder.release.send(());
            let conn = holder.task.await.map_err(|e| ServerError::Join {
                message: e.to_string(),
            })?;
            match conn {
                Some(conn) => ready.push((role, conn)),
                None => {
                    self.sessions.close(role);
                }
            }
        }
        Ok(ready)
    }
}

/// A registered connection parked until the start frame. Its task watches
/// for the client leaving and hands the connection back once released.
struct Holder {
    peer: SocketAddr,
    release: oneshot::Sender<()>,
    task: JoinHandle<Option<ValueConnection>>,
}

impl Holder {
    fn spawn(
        role: Role,
        mut conn: ValueConnection,
        departed: tokio_mpsc::UnboundedSender<(Role, SocketAddr)>,
    ) -> Self {
        let peer = conn.peer_addr();
        let (release, mut released) = oneshot::channel();

        let task = tokio::spawn(async move {
            let frame = tokio::select! {
                biased;
                _ = &mut released => None,
                frame = conn.recv() => Some(frame),
            };
            let Some(frame) = frame else {
                return Some(conn);
            };

            match frame {
                Ok(None) => tracing::info!("{} left before start", role),
                Ok(Some(_)) => tracing::warn!("{} sent a request before start", role),
                Err(e) => tracing::warn!("{} failed before start: {}", role, e),
            }
            let _ = departed.send((role, peer));
            None
        });

        Self {
            peer,
            release,
            task,
        }
    }
}

/// Answers a network client through its bridge task.
struct SessionResponder {
    tx: tokio_mpsc::UnboundedSender<Value>,
}

impl Responder for SessionResponder {
    fn respond(&self, value: Value) -> Result<(), SendError> {
        self.tx
            .send(value)
            .map_err(|_| SendError::new("session closed"))
    }
}

/// Relays frames between one connection and the arbiter until either side
/// goes away. Dropping `requests` on exit surfaces as a disconnect in the
/// arbiter.
async fn bridge(
    role: Role,
    mut conn: ValueConnection,
    requests: ValueSender,
    mut responses: tokio_mpsc::UnboundedReceiver<Value>,
) {
    loop {
        let request = match conn.recv().await {
            Ok(Some(request)) => request,
            Ok(None) => {
                tracing::info!("{} disconnected", role);
                return;
            }
            Err(e) => {
                tracing::error!("{} read error: {}", role, e);
                return;
            }
        };

        if let Err(e) = requests.try_send(request) {
            tracing::error!("{} request dropped: {}", role, e);
            return;
        }

        let Some(response) = responses.recv().await else {
            tracing::debug!("{} arbiter gone", role);
            return;
        };

        if let Err(e) = conn.send(response).await {
            tracing::error!("{} write error: {}", role, e);
            return;
        }
    }
}
