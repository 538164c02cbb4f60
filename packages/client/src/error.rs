//! Error types for the Skydesk client.

use std::{io, net::SocketAddr};

use rustyline::error::ReadlineError;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connecting to, writing to or reading from the server failed
    #[error("Connection error with {addr}: {source}")]
    Connection {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The line editor failed
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
}
