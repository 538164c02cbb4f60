//! Multi-port flight desk server.
//!
//! Loads the seed file, starts one listener per port and reads operator
//! commands from stdin until `EXIT`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin skydesk-server -- 127.0.0.1 9000 3 flights.txt snapshot.txt
//! cargo run --bin skydesk-server -- 0.0.0.0 9000 20 flights.txt snapshot.txt --max-ports 20
//! ```

use std::{io, net::IpAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use skydesk_server::{
    domain::{Desk, Inventory, SessionRegistry, inventory::DEFAULT_MAX_SEATS},
    infrastructure::{repository::BTreeFlightStore, seed::load_seed_file},
    ui::{Console, DEFAULT_MAX_PORTS, Server, ServerConfig},
};
use skydesk_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "skydesk-server")]
#[command(about = "Multi-port flight desk server with a broadcast chat room", long_about = None)]
struct Args {
    /// IP address every listener binds to
    ip_address: IpAddr,

    /// First port; listeners use consecutive ports from here
    start_port: u16,

    /// Number of listener ports
    port_count: usize,

    /// Seed file with one `<flight> <seats>` record per line
    seed_file: PathBuf,

    /// File the console `WRITE` command saves the inventory to
    output_file: PathBuf,

    /// Maximum number of listener ports
    #[arg(long, default_value_t = DEFAULT_MAX_PORTS)]
    max_ports: usize,

    /// Maximum seats a flight can hold
    #[arg(long, default_value_t = DEFAULT_MAX_SEATS)]
    max_seats: u32,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            ip_address: args.ip_address,
            start_port: args.start_port,
            port_count: args.port_count,
            max_ports: args.max_ports,
            max_seats: args.max_seats,
            seed_file: args.seed_file,
            output_file: args.output_file,
        }
    }
}

fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());
    if let Err(e) = run(config) {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Configuration and seed errors end the process before any listener starts
    let addrs = config.listen_addrs()?;
    let mut inventory = Inventory::new(Box::new(BTreeFlightStore::new()), config.max_seats);
    load_seed_file(&config.seed_file, &mut inventory)?;

    let desk = Arc::new(Desk::new(inventory, SessionRegistry::new(addrs.len())));
    let server = Server::start(desk.clone(), &addrs)?;
    if server.listener_count() == 0 {
        return Err("no listener could be started".into());
    }

    let console = Console::new(desk, config.output_file);
    let result = console.run(io::stdin().lock(), io::stdout());
    server.shutdown();
    result?;

    Ok(())
}
