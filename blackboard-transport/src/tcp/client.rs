//! TCP connector for client processes.

use super::connection::ValueConnection;
use super::server::DEFAULT_PORT;
use crate::error::TransportError;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;

/// Configuration for connecting to the arbiter.
#[derive(Debug, Clone)]
pub struct TcpClientConfig {
    /// Arbiter address to connect to.
    pub server_addr: SocketAddr,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Enable TCP_NODELAY.
    pub tcp_nodelay: bool,
}

impl Default for TcpClientConfig {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            connect_timeout: Duration::from_secs(5),
            tcp_nodelay: true,
        }
    }
}

impl TcpClientConfig {
    /// Creates a new client config with the specified server address.
    #[must_use]
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            ..Default::default()
        }
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets TCP_NODELAY option.
    #[must_use]
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp_nodelay = enabled;
        self
    }
}

/// Connects to the arbiter with the given configuration.
///
/// # Errors
/// Returns `ConnectTimeout` if the timeout elapses, or IO error if the
/// connection is refused.
pub async fn connect(config: &TcpClientConfig) -> Result<ValueConnection, TransportError> {
    let stream = tokio::time::timeout(
        config.connect_timeout,
        TcpStream::connect(config.server_addr),
    )
    .await
    .map_err(|_| TransportError::ConnectTimeout)??;

    stream.set_nodelay(config.tcp_nodelay)?;
    tracing::debug!("Connected to {}", config.server_addr);
    ValueConnection::new(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tcp_client_config_default() {
        let config = TcpClientConfig::default();
        assert_eq!(config.server_addr.port(), DEFAULT_PORT);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert!(config.tcp_nodelay);
    }

    #[test]
    fn test_tcp_client_config_builder() {
        let addr: SocketAddr = "127.0.0.1:9200".parse().unwrap();
        let config = TcpClientConfig::new(addr)
            .connect_timeout(Duration::from_millis(250))
            .tcp_nodelay(false);

        assert_eq!(config.server_addr, addr);
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert!(!config.tcp_nodelay);
    }

    #[tokio::test]
    async fn test_connect_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = connect(&TcpClientConfig::new(addr)).await;
        assert!(matches!(result, Err(TransportError::Io(_))));
    }

    #[tokio::test]
    async fn test_connect_ok() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let conn = connect(&TcpClientConfig::new(addr)).await.unwrap();
        assert_eq!(conn.peer_addr(), addr);
    }
}
