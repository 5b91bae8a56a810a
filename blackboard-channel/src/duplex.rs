//! Request/response channel pairs.
//!
//! Each client role owns one duplex pair: a request channel the client sends
//! on and the arbiter receives from, and a response channel flowing back.

use crate::ChannelError;
use crate::value::{ValueChannel, ValueReceiver, ValueSender};
use blackboard_core::Value;
use std::time::Duration;

/// Creates a duplex pair with the given capacity in each direction.
#[must_use]
pub fn pair(capacity: usize) -> (ClientEnd, ServerEnd) {
    DuplexChannel::bounded(capacity)
}

/// Duplex channel factory.
pub struct DuplexChannel;

impl DuplexChannel {
    /// Creates a duplex pair with the given capacity in each direction.
    #[must_use]
    pub fn bounded(capacity: usize) -> (ClientEnd, ServerEnd) {
        let (request_tx, request_rx) = ValueChannel::bounded(capacity);
        let (response_tx, response_rx) = ValueChannel::bounded(capacity);
        (
            ClientEnd {
                requests: request_tx,
                responses: response_rx,
            },
            ServerEnd {
                requests: request_rx,
                responses: response_tx,
            },
        )
    }
}

/// The client's half: sends requests, receives responses.
pub struct ClientEnd {
    requests: ValueSender,
    responses: ValueReceiver,
}

impl ClientEnd {
    /// Sends one request frame.
    ///
    /// # Errors
    /// Returns `Disconnected` if the arbiter dropped its end.
    pub fn send_request(&self, value: Value) -> Result<(), ChannelError> {
        self.requests.send(value)
    }

    /// Blocks until the arbiter responds.
    ///
    /// # Errors
    /// Returns `Disconnected` if the arbiter dropped its end.
    pub fn recv_response(&self) -> Result<Value, ChannelError> {
        self.responses.recv()
    }

    /// Waits up to `timeout` for a response.
    ///
    /// # Errors
    /// Returns `Timeout` or `Disconnected`.
    pub fn recv_response_timeout(&self, timeout: Duration) -> Result<Value, ChannelError> {
        self.responses.recv_timeout(timeout)
    }

    /// Returns a response if one is already waiting.
    ///
    /// # Errors
    /// Returns `Disconnected` if the arbiter dropped its end.
    pub fn try_recv_response(&self) -> Result<Option<Value>, ChannelError> {
        self.responses.try_recv()
    }

    /// Sends a request and blocks for the matching response.
    ///
    /// # Errors
    /// Returns `Disconnected` if the arbiter dropped its end.
    pub fn call(&self, value: Value) -> Result<Value, ChannelError> {
        self.send_request(value)?;
        self.recv_response()
    }
}

/// The arbiter's half: receives requests, sends responses.
pub struct ServerEnd {
    requests: ValueReceiver,
    responses: ValueSender,
}

impl ServerEnd {
    /// Splits the end into its request receiver and response sender.
    #[must_use]
    pub fn into_parts(self) -> (ValueReceiver, ValueSender) {
        (self.requests, self.responses)
    }

    /// Returns the request receiver.
    #[must_use]
    pub fn requests(&self) -> &ValueReceiver {
        &self.requests
    }

    /// Returns the response sender.
    #[must_use]
    pub fn responses(&self) -> &ValueSender {
        &self.responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_request_reaches_server() {
        let (client, server) = pair(1);
        client.send_request(5).unwrap();
        assert_eq!(server.requests().try_recv(), Ok(Some(5)));
    }

    #[test]
    fn test_call_round_trip() {
        let (client, server) = pair(1);

        let echo = thread::spawn(move || {
            let value = server.requests().recv().unwrap();
            server.responses().send(value * 2).unwrap();
        });

        assert_eq!(client.call(21), Ok(42));
        echo.join().unwrap();
    }

    #[test]
    fn test_call_after_server_dropped() {
        let (client, server) = pair(1);
        drop(server);
        assert_eq!(client.call(1), Err(ChannelError::Disconnected));
    }

    #[test]
    fn test_server_sees_client_drop() {
        let (client, server) = pair(1);
        drop(client);
        let (requests, responses) = server.into_parts();
        assert_eq!(requests.try_recv(), Err(ChannelError::Disconnected));
        assert_eq!(responses.send(1), Err(ChannelError::Disconnected));
    }

    #[test]
    fn test_response_timeout() {
        let (client, _server) = pair(1);
        assert_eq!(
            client.recv_response_timeout(Duration::from_millis(10)),
            Err(ChannelError::Timeout)
        );
        assert_eq!(client.try_recv_response(), Ok(None));
    }
}
