//! TCP listener for the arbiter process.

use super::connection::ValueConnection;
use crate::error::TransportError;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;

/// Default port the arbiter listens on.
pub const DEFAULT_PORT: u16 = 7070;

/// Configuration for the TCP listener.
#[derive(Debug, Clone)]
pub struct TcpServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Enable TCP_NODELAY on accepted connections.
    pub tcp_nodelay: bool,
}

impl Default for TcpServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            tcp_nodelay: true,
        }
    }
}

impl TcpServerConfig {
    /// Creates a new server config with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Default::default()
        }
    }

    /// Sets TCP_NODELAY on accepted connections.
    #[must_use]
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp_nodelay = enabled;
        self
    }
}

/// TCP listener handing out [`ValueConnection`]s.
pub struct TcpServer {
    listener: TcpListener,
    config: TcpServerConfig,
}

impl TcpServer {
    /// Binds to the configured address.
    ///
    /// # Errors
    /// Returns IO error if binding fails.
    pub async fn bind(config: TcpServerConfig) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(config.bind_addr).await?;
        Ok(Self { listener, config })
    }

    /// Accepts a new connection.
    ///
    /// # Errors
    /// Returns IO error if accept fails.
    pub async fn accept(&self) -> Result<ValueConnection, TransportError> {
        let (stream, addr) = self.listener.accept().await?;
        tracing::debug!("Accepted connection from {}", addr);
        stream.set_nodelay(self.config.tcp_nodelay)?;
        ValueConnection::new(stream)
    }

    /// Returns the local address the server is bound to.
    ///
    /// # Errors
    /// Returns IO error if the address cannot be read.
    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.listener.local_addr()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tcp_server_config_default() {
        let config = TcpServerConfig::default();
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert!(config.bind_addr.ip().is_loopback());
        assert!(config.tcp_nodelay);
    }

    #[test]
    fn test_tcp_server_config_builder() {
        let addr: SocketAddr = "0.0.0.0:9100".parse().unwrap();
        let config = TcpServerConfig::new(addr).tcp_nodelay(false);
        assert_eq!(config.bind_addr, addr);
        assert!(!config.tcp_nodelay);
    }

    #[tokio::test]
    async fn test_bind_ephemeral_and_accept() {
        let config = TcpServerConfig::new("127.0.0.1:0".parse().unwrap());
        let server = TcpServer::bind(config).await.unwrap();
        let addr = server.local_addr().unwrap();
        assert_ne!(addr.port(), 0);

        let client = tokio::spawn(async move { tokio::net::TcpStream::connect(addr).await });
        let conn = server.accept().await.unwrap();
        let stream = client.await.unwrap().unwrap();
        assert_eq!(conn.peer_addr(), stream.local_addr().unwrap());
    }

    #[tokio::test]
    async fn test_bind_in_use() {
        let first = TcpServer::bind(TcpServerConfig::new("127.0.0.1:0".parse().unwrap()))
            .await
            .unwrap();
        let addr = first.local_addr().unwrap();
        let second = TcpServer::bind(TcpServerConfig::new(addr)).await;
        assert!(matches!(second, Err(TransportError::Io(_))));
    }
}
