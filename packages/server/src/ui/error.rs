//! UI layer errors.

use std::{io, net::SocketAddr};

use thiserror::Error;

use crate::domain::SessionError;

/// Resource failures that end a listener thread
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("accept failed on {addr}: {source}")]
    Accept {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("read failed on {addr}: {source}")]
    Read {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("write failed on {addr}: {source}")]
    Write {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Startup configuration rejected before any listener starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("port count must be between 1 and {max}, got {count}")]
    PortCount { count: usize, max: usize },

    #[error("{count} ports starting at {start} exceed the port range")]
    PortRange { start: u16, count: usize },

    #[error("{listeners} listeners requested but only {sessions} session slots")]
    TooManyListeners { listeners: usize, sessions: usize },
}
