//! A framed TCP connection carrying values.

use crate::error::TransportError;
use crate::framing::ValueCodec;
use blackboard_core::Value;
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

/// A TCP connection exchanging [`Value`] frames.
pub struct ValueConnection {
    framed: Framed<TcpStream, ValueCodec>,
    peer_addr: SocketAddr,
}

impl ValueConnection {
    /// Wraps an established stream.
    ///
    /// # Errors
    /// Returns IO error if the peer address cannot be read.
    pub fn new(stream: TcpStream) -> Result<Self, TransportError> {
        let peer_addr = stream.peer_addr()?;
        Ok(Self {
            framed: Framed::new(stream, ValueCodec::new()),
            peer_addr,
        })
    }

    /// Returns the peer address.
    #[must_use]
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Sends one value and flushes it.
    ///
    /// # Errors
    /// Returns `TransportError` if the write fails.
    pub async fn send(&mut self, value: Value) -> Result<(), TransportError> {
        self.framed.send(value).await
    }

    /// Receives one value.
    ///
    /// # Returns
    /// `Ok(Some(value))` if a frame arrived, `Ok(None)` if the peer closed cleanly.
    ///
    /// # Errors
    /// Returns `TransportError` on IO failure or a truncated trailing frame.
    pub async fn recv(&mut self) -> Result<Option<Value>, TransportError> {
        self.framed.next().await.transpose()
    }

    /// Receives one value, treating a clean close as an error.
    ///
    /// # Errors
    /// Returns `ConnectionClosed` if the peer closed, or any receive error.
    pub async fn recv_required(&mut self) -> Result<Value, TransportError> {
        self.recv().await?.ok_or(TransportError::ConnectionClosed)
    }

    /// Flushes and closes the connection.
    ///
    /// # Errors
    /// Returns `TransportError` if the flush fails.
    pub async fn close(mut self) -> Result<(), TransportError> {
        SinkExt::<Value>::close(&mut self.framed).await
    }
}

impl std::fmt::Debug for ValueConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueConnection")
            .field("peer_addr", &self.peer_addr)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    async fn loopback() -> (ValueConnection, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server, _) = listener.accept().await.unwrap();
        (ValueConnection::new(server).unwrap(), client)
    }

    #[tokio::test]
    async fn test_recv_reassembles_split_frame() {
        let (mut conn, mut raw) = loopback().await;

        raw.write_all(&[42, 0]).await.unwrap();
        raw.flush().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        raw.write_all(&[0, 0]).await.unwrap();

        assert_eq!(conn.recv().await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_recv_clean_close() {
        let (mut conn, raw) = loopback().await;
        drop(raw);
        assert_eq!(conn.recv().await.unwrap(), None);
        assert!(matches!(
            conn.recv_required().await,
            Err(TransportError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn test_recv_truncated_close() {
        let (mut conn, mut raw) = loopback().await;
        raw.write_all(&[1, 2, 3]).await.unwrap();
        raw.shutdown().await.unwrap();
        drop(raw);

        let result = conn.recv().await;
        assert!(matches!(result, Err(TransportError::TruncatedFrame { .. })));
    }

    #[tokio::test]
    async fn test_send_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server, _) = listener.accept().await.unwrap();

        let mut a = ValueConnection::new(client).unwrap();
        let mut b = ValueConnection::new(server).unwrap();

        a.send(-12).await.unwrap();
        assert_eq!(b.recv_required().await.unwrap(), -12);
        b.send(1).await.unwrap();
        assert_eq!(a.recv_required().await.unwrap(), 1);
        assert_eq!(a.peer_addr(), addr);
    }
}
