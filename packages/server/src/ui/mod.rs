//! UI layer: TCP listeners, server lifecycle and the operator console.

pub mod config;
pub mod console;
pub mod error;
pub mod listener;
pub mod server;

pub use config::{DEFAULT_MAX_PORTS, ServerConfig};
pub use console::{Console, ConsoleCommand};
pub use error::{ConfigError, ListenerError};
pub use listener::Listener;
pub use server::Server;
