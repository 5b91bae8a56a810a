//! Bounded single-value channels.
//!
//! Thin wrappers over `crossbeam-channel` carrying wire values. The receiver
//! exposes its inner handle so the arbiter can register it in a
//! `crossbeam_channel::Select`.

use crate::ChannelError;
use blackboard_core::Value;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError, bounded};
use std::time::Duration;

/// Creates a new bounded value channel pair.
///
/// # Arguments
/// * `capacity` - Maximum number of values the channel can hold
///
/// # Returns
/// A tuple of (sender, receiver).
#[must_use]
pub fn channel(capacity: usize) -> (ValueSender, ValueReceiver) {
    ValueChannel::bounded(capacity)
}

/// Value channel factory.
pub struct ValueChannel;

impl ValueChannel {
    /// Creates a new bounded value channel pair.
    ///
    /// A capacity of zero is raised to one, so a request is queued (and
    /// visible to a select) before the arbiter takes it.
    #[must_use]
    pub fn bounded(capacity: usize) -> (ValueSender, ValueReceiver) {
        let (sender, receiver) = bounded(capacity.max(1));
        (
            ValueSender { inner: sender },
            ValueReceiver { inner: receiver },
        )
    }
}

/// Sending half of a value channel.
#[derive(Clone)]
pub struct ValueSender {
    inner: Sender<Value>,
}

impl ValueSender {
    /// Blocking send. Waits while the channel is full.
    ///
    /// # Errors
    /// Returns `Disconnected` if the receiver was dropped.
    pub fn send(&self, value: Value) -> Result<(), ChannelError> {
        self.inner.send(value).map_err(|_| ChannelError::Disconnected)
    }

    /// Non-blocking send attempt.
    ///
    /// # Errors
    /// Returns `Full` or `Disconnected`.
    #[inline]
    pub fn try_send(&self, value: Value) -> Result<(), ChannelError> {
        self.inner.try_send(value).map_err(|e| match e {
            TrySendError::Full(_) => ChannelError::Full,
            TrySendError::Disconnected(_) => ChannelError::Disconnected,
        })
    }

    /// Returns the number of values currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Receiving half of a value channel.
pub struct ValueReceiver {
    inner: Receiver<Value>,
}

impl ValueReceiver {
    /// Blocking receive.
    ///
    /// # Errors
    /// Returns `Disconnected` once every sender is gone and the channel is drained.
    pub fn recv(&self) -> Result<Value, ChannelError> {
        self.inner.recv().map_err(|_| ChannelError::Disconnected)
    }

    /// Non-blocking receive.
    ///
    /// # Returns
    /// `Ok(Some(value))` if one was queued, `Ok(None)` if the channel is empty.
    ///
    /// # Errors
    /// Returns `Disconnected` once every sender is gone and the channel is drained.
    #[inline]
    pub fn try_recv(&self) -> Result<Option<Value>, ChannelError> {
        match self.inner.try_recv() {
            Ok(value) => Ok(Some(value)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ChannelError::Disconnected),
        }
    }

    /// Receive with timeout.
    ///
    /// # Errors
    /// Returns `Timeout` or `Disconnected`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Value, ChannelError> {
        self.inner.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => ChannelError::Timeout,
            RecvTimeoutError::Disconnected => ChannelError::Disconnected,
        })
    }

    /// Returns a reference to the underlying crossbeam receiver for select operations.
    #[must_use]
    pub fn as_select(&self) -> &Receiver<Value> {
        &self.inner
    }

    /// Returns the number of values currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_basic_send_recv() {
        let (tx, rx) = channel(4);

        tx.send(42).unwrap();
        assert_eq!(rx.try_recv(), Ok(Some(42)));
        assert_eq!(rx.try_recv(), Ok(None));
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let (tx, rx) = channel(0);
        assert!(tx.try_send(1).is_ok());
        assert_eq!(tx.try_send(2), Err(ChannelError::Full));
        assert_eq!(rx.recv(), Ok(1));
    }

    #[test]
    fn test_disconnect_after_drain() {
        let (tx, rx) = channel(4);
        tx.send(7).unwrap();
        drop(tx);

        assert_eq!(rx.try_recv(), Ok(Some(7)));
        assert_eq!(rx.try_recv(), Err(ChannelError::Disconnected));
        assert_eq!(rx.recv(), Err(ChannelError::Disconnected));
    }

    #[test]
    fn test_send_to_dropped_receiver() {
        let (tx, rx) = channel(4);
        drop(rx);
        assert_eq!(tx.send(1), Err(ChannelError::Disconnected));
        assert_eq!(tx.try_send(1), Err(ChannelError::Disconnected));
    }

    #[test]
    fn test_recv_timeout() {
        let (_tx, rx) = channel(4);
        let result = rx.recv_timeout(Duration::from_millis(10));
        assert_eq!(result, Err(ChannelError::Timeout));
    }

    #[test]
    fn test_threaded_send() {
        let (tx, rx) = channel(1);

        let handle = thread::spawn(move || {
            for i in 0..10 {
                tx.send(i).unwrap();
            }
        });

        let received: Vec<_> = (0..10).map(|_| rx.recv().unwrap()).collect();
        handle.join().unwrap();
        assert_eq!(received, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_len() {
        let (tx, rx) = channel(4);
        assert!(tx.is_empty());
        tx.send(1).unwrap();
        tx.send(2).unwrap();
        assert_eq!(tx.len(), 2);
        assert_eq!(rx.len(), 2);
        assert!(!rx.is_empty());
    }
}
