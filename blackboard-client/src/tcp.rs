//! Network link to an arbiter process.

use crate::error::ClientError;
use crate::link::RoleLink;
use blackboard_core::{Role, Value};
use blackboard_transport::tcp::{self, handshake};
use blackboard_transport::{TcpClientConfig, ValueConnection};
use std::net::SocketAddr;
use std::time::Duration;

/// Builder for configuring and connecting a network client.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    role: Role,
    tcp: TcpClientConfig,
}

impl ClientBuilder {
    /// Creates a new builder for a role and server address.
    #[must_use]
    pub fn new(role: Role, server_addr: SocketAddr) -> Self {
        Self {
            role,
            tcp: TcpClientConfig::new(server_addr),
        }
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.tcp = self.tcp.connect_timeout(timeout);
        self
    }

    /// Sets TCP_NODELAY option.
    #[must_use]
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp = self.tcp.tcp_nodelay(enabled);
        self
    }

    /// Connects and completes the role handshake.
    ///
    /// # Errors
    /// Returns `ClientError` if the connection fails or the role is rejected.
    pub async fn connect(self) -> Result<TcpLink, ClientError> {
        TcpLink::connect(&self.tcp, self.role).await
    }
}

/// Link over a TCP connection to the arbiter process.
#[derive(Debug)]
pub struct TcpLink {
    role: Role,
    ack_token: Value,
    conn: ValueConnection,
}

impl TcpLink {
    /// Connects, announces the role and waits until the arbiter starts.
    ///
    /// Returns only once all four roles are registered.
    ///
    /// # Errors
    /// Returns `Transport` if the connection fails or the arbiter closes it,
    /// which is how an invalid or duplicate role is rejected.
    pub async fn connect(config: &TcpClientConfig, role: Role) -> Result<Self, ClientError> {
        let mut conn = tcp::connect(config).await?;
        handshake::announce(&mut conn, role).await?;
        tracing::debug!("{} waiting for start from {}", role, conn.peer_addr());

        let ack_token = handshake::await_start(&mut conn).await?;
        tracing::info!("{} started", role);

        Ok(Self {
            role,
            ack_token,
            conn,
        })
    }

    /// Returns the arbiter's address.
    #[must_use]
    pub fn peer_addr(&self) -> SocketAddr {
        self.conn.peer_addr()
    }

    /// Closes the connection.
    ///
    /// # Errors
    /// Returns `Transport` if the final flush fails.
    pub async fn close(self) -> Result<(), ClientError> {
        Ok(self.conn.close().await?)
    }
}

impl RoleLink for TcpLink {
    fn role(&self) -> Role {
        self.role
    }

    fn ack_token(&self) -> Value {
        self.ack_token
    }

    async fn exchange(&mut self, request: Value) -> Result<Value, ClientError> {
        self.conn.send(request).await?;
        Ok(self.conn.recv_required().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackboard_transport::TransportError;
    use tokio::net::TcpListener;

    async fn listener() -> (TcpListener, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    #[test]
    fn test_client_builder() {
        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        let builder = ClientBuilder::new(Role::Reader0, addr)
            .connect_timeout(Duration::from_secs(1))
            .tcp_nodelay(false);
        assert_eq!(builder.role, Role::Reader0);
        assert_eq!(builder.tcp.server_addr, addr);
        assert_eq!(builder.tcp.connect_timeout, Duration::from_secs(1));
        assert!(!builder.tcp.tcp_nodelay);
    }

    #[tokio::test]
    async fn test_connect_and_exchange() {
        let (listener, addr) = listener().await;
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut conn = ValueConnection::new(stream).unwrap();
            let role = handshake::read_role(&mut conn).await.unwrap();
            handshake::start(&mut conn, 7).await.unwrap();
            let request = conn.recv_required().await.unwrap();
            conn.send(7).await.unwrap();
            (role, request)
        });

        let mut link = ClientBuilder::new(Role::Writer1, addr)
            .connect()
            .await
            .unwrap();
        assert_eq!(link.ack_token(), 7);
        assert_eq!(link.peer_addr(), addr);
        assert_eq!(link.exchange(55).await.unwrap(), 7);

        let (role, request) = server.await.unwrap();
        assert_eq!(role, Role::Writer1);
        assert_eq!(request, 55);
    }

    #[tokio::test]
    async fn test_rejected_role() {
        let (listener, addr) = listener().await;
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut conn = ValueConnection::new(stream).unwrap();
            let _ = handshake::read_role(&mut conn).await;
        });

        let result = TcpLink::connect(&TcpClientConfig::new(addr), Role::Reader1).await;
        assert!(matches!(
            result,
            Err(ClientError::Transport(TransportError::ConnectionClosed))
        ));
    }
}
