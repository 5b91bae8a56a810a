//! Client process: plays one role against a running arbiter.
//!
//! Run with: `cargo run --bin blackboard-client -- w0`

use blackboard::logging;
use blackboard_client::{ClientBuilder, ReaderConfig, WriterConfig, reader, writer};
use blackboard_core::{Role, RoleKind};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "blackboard-client")]
#[command(version, about = "Writer or reader client for the blackboard arbiter", long_about = None)]
struct Cli {
    /// Role to play: w0, w1, r0 or r1
    role: Role,

    /// Arbiter address
    #[arg(short, long, default_value = "127.0.0.1:7070")]
    server: SocketAddr,

    /// Milliseconds a writer sleeps between writes
    #[arg(short, long, default_value_t = 500)]
    interval: u64,

    /// Stop after this many writes or reads
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// Directory for reader log files
    #[arg(short, long, default_value = ".")]
    log_dir: PathBuf,

    /// Seconds to wait for the TCP connection
    #[arg(long, default_value_t = 5)]
    connect_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");
    let cli = Cli::parse();

    let mut link = ClientBuilder::new(cli.role, cli.server)
        .connect_timeout(Duration::from_secs(cli.connect_timeout))
        .connect()
        .await?;

    let count = match cli.role.kind() {
        RoleKind::Writer => {
            let mut config = WriterConfig::default().interval(Duration::from_millis(cli.interval));
            config.max_iterations = cli.iterations;
            writer::run_writer(&mut link, &config).await?
        }
        RoleKind::Reader => {
            let mut config = ReaderConfig::default().log_dir(cli.log_dir);
            config.max_iterations = cli.iterations;
            reader::run_reader(&mut link, &config).await?
        }
    };

    tracing::info!("{} finished after {} exchanges", cli.role, count);
    link.close().await?;
    Ok(())
}
