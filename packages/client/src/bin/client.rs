//! Line-mode client for the Skydesk flight desk server.
//!
//! Reads a command at the `skydesk>` prompt, sends it to the server over a
//! fresh connection and prints every frame that comes back. Chat lines
//! broadcast while the prompt was waiting are printed ahead of the reply.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin skydesk-client -- 127.0.0.1 9000
//! ```

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use skydesk_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "skydesk-client")]
#[command(about = "Line-mode client for a Skydesk flight desk server", long_about = None)]
struct Args {
    /// Server IP address
    ip_address: IpAddr,

    /// Server port; each port serves one session
    port: u16,
}

fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = skydesk_client::run_client(SocketAddr::new(args.ip_address, args.port)) {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
