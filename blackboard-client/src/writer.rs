//! Writer role: stores random values in its cell.

use crate::error::ClientError;
use crate::link::{RoleLink, ensure_kind};
use blackboard_core::{RoleKind, Value};
use rand::Rng;
use std::ops::Range;
use std::time::Duration;

/// Configuration for the writer loop.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Pause after each acknowledged write.
    pub interval: Duration,
    /// Values are drawn uniformly from this range.
    pub values: Range<Value>,
    /// Stop after this many writes. `None` runs forever.
    pub max_iterations: Option<u64>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            values: 0..100,
            max_iterations: None,
        }
    }
}

impl WriterConfig {
    /// Sets the pause between writes.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the range values are drawn from.
    #[must_use]
    pub fn values(mut self, values: Range<Value>) -> Self {
        self.values = values;
        self
    }

    /// Sets the number of writes before the loop returns.
    #[must_use]
    pub fn max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = Some(max);
        self
    }
}

/// Sends one value and waits for the arbiter's acknowledgment.
///
/// # Errors
/// Returns `WrongRole` for a reader link, `UnexpectedAck` if the response is
/// not the ack token, or any link error.
pub async fn write<L: RoleLink>(link: &mut L, value: Value) -> Result<(), ClientError> {
    ensure_kind(link, RoleKind::Writer, "write")?;
    let ack = link.exchange(value).await?;
    if ack != link.ack_token() {
        return Err(ClientError::UnexpectedAck {
            expected: link.ack_token(),
            actual: ack,
        });
    }
    Ok(())
}

/// Writes random values until the iteration limit or the first error.
///
/// Returns the number of values written.
///
/// # Errors
/// Returns `Config` for an empty value range, or the first write error.
pub async fn run_writer<L: RoleLink>(
    link: &mut L,
    config: &WriterConfig,
) -> Result<u64, ClientError> {
    ensure_kind(link, RoleKind::Writer, "write")?;
    if config.values.is_empty() {
        return Err(ClientError::config(format!(
            "empty value range {:?}",
            config.values
        )));
    }

    let role = link.role();
    let mut written = 0;
    while config.max_iterations.is_none_or(|max| written < max) {
        let value = rand::rng().random_range(config.values.clone());
        write(link, value).await?;
        tracing::info!("{} wrote {}", role, value);
        written += 1;
        tokio::time::sleep(config.interval).await;
    }
    Ok(written)
}
