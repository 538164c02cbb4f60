//! One request/reply exchange over a fresh TCP connection.

use std::net::{SocketAddr, TcpStream};

use skydesk_shared::wire;

use crate::error::ClientError;

/// Connection opened ahead of the next request.
///
/// The server attaches a connection to the chat room as soon as it accepts
/// it, so broadcasts sent while the user is still typing are buffered in the
/// socket and read back together with the reply.
pub struct Connection {
    addr: SocketAddr,
    stream: TcpStream,
}

impl Connection {
    pub fn open(addr: SocketAddr) -> Result<Self, ClientError> {
        let stream =
            TcpStream::connect(addr).map_err(|source| ClientError::Connection { addr, source })?;
        tracing::debug!("Connected to {}", addr);
        Ok(Self { addr, stream })
    }

    /// Send `line` and read every frame until the server closes
    pub fn request(self, line: &str) -> Result<Vec<String>, ClientError> {
        let addr = self.addr;
        let connection_error = |source| ClientError::Connection { addr, source };

        wire::write_request(&self.stream, line).map_err(connection_error)?;
        let frames = wire::read_frames(&self.stream).map_err(connection_error)?;
        tracing::debug!("Received {} frames from {}", frames.len(), addr);
        Ok(frames)
    }
}

/// Open a connection, send `line` and collect the reply frames
pub fn send_request(addr: SocketAddr, line: &str) -> Result<Vec<String>, ClientError> {
    Connection::open(addr)?.request(line)
}
