//! Arbiter process: waits for the four roles over TCP, then serves them.
//!
//! Run with: `cargo run --bin blackboard-server -- --bind 127.0.0.1:7070`

use blackboard::logging;
use blackboard_core::{ACK, Value};
use blackboard_server::{ArbiterBuilder, ServerBuilder};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "blackboard-server")]
#[command(version, about = "Blackboard arbiter listening for writer and reader roles", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:7070")]
    bind: SocketAddr,

    /// Token sent to writers after each stored value
    #[arg(long, default_value_t = ACK, allow_negative_numbers = true)]
    ack_token: Value,

    /// Seconds a new connection has to announce its role
    #[arg(long, default_value_t = 10)]
    handshake_timeout: u64,

    /// Disable TCP_NODELAY on client connections
    #[arg(long)]
    no_nodelay: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");
    let cli = Cli::parse();

    let server = ServerBuilder::new()
        .bind(cli.bind)
        .tcp_nodelay(!cli.no_nodelay)
        .handshake_timeout(Duration::from_secs(cli.handshake_timeout))
        .arbiter(ArbiterBuilder::new().ack_token(cli.ack_token))
        .build();

    let Err(e) = server.run().await;
    Err(e.into())
}
