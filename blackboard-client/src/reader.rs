//! Reader role: polls its cell and appends each new value to a log file.

use crate::error::ClientError;
use crate::link::{RoleLink, ensure_kind};
use blackboard_core::{READ_REQUEST, Role, RoleKind, Value};
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Configuration for the reader loop.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Directory holding the `log_R<i>.txt` files.
    pub log_dir: PathBuf,
    /// Stop after this many values. `None` runs forever.
    pub max_iterations: Option<u64>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("."),
            max_iterations: None,
        }
    }
}

impl ReaderConfig {
    /// Sets the log directory.
    #[must_use]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Sets the number of values read before the loop returns.
    #[must_use]
    pub fn max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Returns the log file of a reader role.
    #[must_use]
    pub fn log_path(&self, role: Role) -> PathBuf {
        self.log_dir.join(format!("log_{}.txt", role.short_name()))
    }
}

/// Asks for the reader's cell and waits until the arbiter has a value the
/// reader has not seen.
///
/// # Errors
/// Returns `WrongRole` for a writer link, or any link error.
pub async fn poll<L: RoleLink>(link: &mut L) -> Result<Value, ClientError> {
    ensure_kind(link, RoleKind::Reader, "poll")?;
    link.exchange(READ_REQUEST).await
}

/// Polls until the iteration limit or the first error, logging each value.
///
/// The log file is truncated and given a header before the first poll.
/// Returns the number of values read.
///
/// # Errors
/// Returns `Io` if the log file cannot be written, or the first poll error.
pub async fn run_reader<L: RoleLink>(
    link: &mut L,
    config: &ReaderConfig,
) -> Result<u64, ClientError> {
    ensure_kind(link, RoleKind::Reader, "poll")?;
    let role = link.role();
    let cell = role.cell();

    let path = config.log_path(role);
    let mut log = File::create(&path).await?;
    log.write_all(format!("--- Log {role} ---\n").as_bytes()).await?;
    log.flush().await?;
    tracing::debug!("{} logging to {}", role, path.display());

    let mut read = 0;
    while config.max_iterations.is_none_or(|max| read < max) {
        let value = poll(link).await?;
        log.write_all(format!("New Value in Cell {cell}: {value}\n").as_bytes()).await?;
        log.flush().await?;
        tracing::info!("{} read {}", role, value);
        read += 1;
    }
    Ok(read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LocalLink;
    use blackboard_channel::DuplexChannel;
    use std::thread;

    /// Answers each poll with the next value from `values`.
    fn fake_arbiter(role: Role, values: Vec<Value>) -> (LocalLink, thread::JoinHandle<()>) {
        let (client, server) = DuplexChannel::bounded(1);
        let handle = thread::spawn(move || {
            for value in values {
                assert_eq!(server.requests().recv().unwrap(), READ_REQUEST);
                server.responses().send(value).unwrap();
            }
        });
        (LocalLink::new(role, client, 1), handle)
    }

    #[test]
    fn test_log_path() {
        let config = ReaderConfig::default().log_dir("/tmp/board");
        assert_eq!(
            config.log_path(Role::Reader1),
            PathBuf::from("/tmp/board/log_R1.txt")
        );
    }

    #[tokio::test]
    async fn test_poll_sends_read_request() {
        let (mut link, handle) = fake_arbiter(Role::Reader0, vec![-1]);
        assert_eq!(poll(&mut link).await.unwrap(), -1);
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_writer_cannot_poll() {
        let (mut link, _handle) = fake_arbiter(Role::Writer1, vec![]);
        let err = poll(&mut link).await.unwrap_err();
        assert!(matches!(err, ClientError::WrongRole { .. }));
    }

    #[tokio::test]
    async fn test_run_reader_writes_log() {
        let dir = tempfile::tempdir().unwrap();
        let (mut link, handle) = fake_arbiter(Role::Reader1, vec![0, 42, 7]);
        let config = ReaderConfig::default().log_dir(dir.path()).max_iterations(3);

        assert_eq!(run_reader(&mut link, &config).await.unwrap(), 3);
        handle.join().unwrap();

        let log = std::fs::read_to_string(dir.path().join("log_R1.txt")).unwrap();
        assert_eq!(
            log,
            "--- Log R1 ---\n\
             New Value in Cell 1: 0\n\
             New Value in Cell 1: 42\n\
             New Value in Cell 1: 7\n"
        );
    }

    #[tokio::test]
    async fn test_run_reader_truncates_previous_log() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReaderConfig::default().log_dir(dir.path()).max_iterations(1);
        std::fs::write(config.log_path(Role::Reader0), "stale\n").unwrap();

        let (mut link, handle) = fake_arbiter(Role::Reader0, vec![5]);
        run_reader(&mut link, &config).await.unwrap();
        handle.join().unwrap();

        let log = std::fs::read_to_string(config.log_path(Role::Reader0)).unwrap();
        assert_eq!(log, "--- Log R0 ---\nNew Value in Cell 0: 5\n");
    }

    #[tokio::test]
    async fn test_run_reader_stops_on_disconnect() {
        let dir = tempfile::tempdir().unwrap();
        let (mut link, handle) = fake_arbiter(Role::Reader0, vec![3]);
        let config = ReaderConfig::default().log_dir(dir.path());

        let err = run_reader(&mut link, &config).await.unwrap_err();
        assert!(matches!(err, ClientError::Channel(_)));
        handle.join().unwrap();

        let log = std::fs::read_to_string(config.log_path(Role::Reader0)).unwrap();
        assert_eq!(log, "--- Log R0 ---\nNew Value in Cell 0: 3\n");
    }
}
