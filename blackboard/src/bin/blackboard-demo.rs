//! Runs the arbiter and all four clients in one process over in-process
//! channels.
//!
//! Run with: `cargo run --bin blackboard-demo -- -n 10`

use blackboard::logging;
use blackboard_client::{ClientError, LocalLink, ReaderConfig, WriterConfig, reader, writer};
use blackboard_core::{ACK, Role, RoleKind, Value};
use blackboard_server::{ArbiterBuilder, ServerError};
use clap::Parser;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "blackboard-demo")]
#[command(version, about = "Blackboard arbiter with in-process writers and readers", long_about = None)]
struct Cli {
    /// Milliseconds each writer sleeps between writes
    #[arg(short, long, default_value_t = 500)]
    interval: u64,

    /// Writes per writer before the demo stops
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// Directory for reader log files
    #[arg(short, long, default_value = ".")]
    log_dir: PathBuf,

    /// Token sent to writers after each stored value
    #[arg(long, default_value_t = ACK, allow_negative_numbers = true)]
    ack_token: Value,
}

/// Runs one client loop on its own thread with a private runtime.
fn spawn_client(
    role: Role,
    mut link: LocalLink,
    writer_config: WriterConfig,
    reader_config: ReaderConfig,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name(role.short_name().to_lowercase())
        .spawn(move || {
            let result = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(ClientError::from)
                .and_then(|runtime| {
                    runtime.block_on(async {
                        match role.kind() {
                            RoleKind::Writer => writer::run_writer(&mut link, &writer_config).await,
                            RoleKind::Reader => reader::run_reader(&mut link, &reader_config).await,
                        }
                    })
                });
            match result {
                Ok(count) => tracing::info!("{} done after {} exchanges", role, count),
                Err(e) => tracing::debug!("{} stopped: {}", role, e),
            }
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");
    let cli = Cli::parse();

    let (mut arbiter, mut clients) = ArbiterBuilder::new().ack_token(cli.ack_token).local()?;

    let mut writer_config = WriterConfig::default().interval(Duration::from_millis(cli.interval));
    writer_config.max_iterations = cli.iterations;
    let reader_config = ReaderConfig::default().log_dir(cli.log_dir);

    for role in Role::ALL {
        let Some(end) = clients.take(role) else {
            continue;
        };
        let link = LocalLink::new(role, end, cli.ack_token);
        spawn_client(role, link, writer_config.clone(), reader_config.clone())?;
    }

    let Err(e) = arbiter.run();
    match e {
        ServerError::Disconnected { role } if cli.iterations.is_some() && role.is_writer() => {
            tracing::info!(
                "{} finished, stopping after {} passes. State: {:?}",
                role,
                arbiter.passes(),
                arbiter.board().cells()
            );
            Ok(())
        }
        e => Err(e.into()),
    }
}
