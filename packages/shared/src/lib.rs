//! Shared library for the Skydesk server and client.
//!
//! Holds the pieces both binaries need: logging setup, time helpers and the
//! wire framing of the line protocol.

pub mod logger;
pub mod time;
pub mod wire;
