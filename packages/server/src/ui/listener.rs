//! Listener: one thread per port, one connection at a time.
//!
//! The listening socket is non-blocking so the loop can notice a cleared
//! `enabled` flag between accepts. Accepted streams are switched back to
//! blocking I/O; a client that connects and never sends holds its port until
//! it leaves or [`Server::shutdown`](super::Server::shutdown) closes the connection.

use std::{
    io,
    net::{Shutdown, SocketAddr, TcpListener, TcpStream},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use skydesk_shared::wire;

use crate::{
    domain::{Channel, Desk},
    usecase::{BroadcastUseCase, DispatchUseCase, Outcome},
};

use super::error::ListenerError;

/// Delay between accept attempts while no client is waiting
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

enum Flow {
    Continue,
    Stop,
}

pub struct Listener {
    index: usize,
    addr: SocketAddr,
    socket: TcpListener,
    enabled: Arc<AtomicBool>,
    desk: Arc<Desk>,
    dispatch: DispatchUseCase,
    broadcast: BroadcastUseCase,
}

impl Listener {
    /// Bind the listener serving session slot `index`
    pub fn bind(
        index: usize,
        addr: SocketAddr,
        desk: Arc<Desk>,
        enabled: Arc<AtomicBool>,
    ) -> Result<Self, ListenerError> {
        let bind_error = |source| ListenerError::Bind { addr, source };
        let socket = TcpListener::bind(addr).map_err(bind_error)?;
        let addr = socket.local_addr().map_err(bind_error)?;
        socket.set_nonblocking(true).map_err(bind_error)?;

        Ok(Self {
            index,
            addr,
            socket,
            enabled,
            dispatch: DispatchUseCase::new(desk.clone()),
            broadcast: BroadcastUseCase::new(desk.clone()),
            desk,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve until disabled, terminated by a client or failed.
    ///
    /// Whatever ends the loop, the session slot is reset on the way out and
    /// the listening socket is closed when `self` drops.
    pub fn run(self) {
        tracing::info!("Listener {} serving on {}", self.index, self.addr);

        if let Err(e) = self.serve() {
            tracing::error!("Listener {} stopped: {}", self.index, e);
        }
        if let Err(e) = self.desk.lock().sessions.reset(self.index) {
            tracing::error!("Listener {} cleanup failed: {}", self.index, e);
        }

        tracing::info!("Listener {} on {} closed", self.index, self.addr);
    }

    fn serve(&self) -> Result<(), ListenerError> {
        while self.enabled.load(Ordering::SeqCst) {
            let (stream, peer) = match self.socket.accept() {
                Ok(accepted) => accepted,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(POLL_INTERVAL);
                    continue;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(ListenerError::Accept {
                        addr: self.addr,
                        source,
                    });
                }
            };

            tracing::debug!("Listener {} accepted {}", self.index, peer);
            if let Flow::Stop = self.handle_connection(stream)? {
                tracing::info!("Listener {} terminated by {}", self.index, peer);
                break;
            }
        }
        Ok(())
    }

    /// Attach the connection to the session for the length of one exchange
    fn handle_connection(&self, stream: TcpStream) -> Result<Flow, ListenerError> {
        stream
            .set_nonblocking(false)
            .map_err(|source| ListenerError::Read {
                addr: self.addr,
                source,
            })?;
        let channel = Channel::from_stream(&stream).map_err(|source| ListenerError::Write {
            addr: self.addr,
            source,
        })?;

        self.desk
            .lock()
            .sessions
            .attach(self.index, channel.clone())?;
        // a shutdown that ran before the attach could not close this connection
        let flow = if self.enabled.load(Ordering::SeqCst) {
            self.exchange(&stream, &channel)
        } else {
            Ok(Flow::Continue)
        };
        self.desk.lock().sessions.detach(self.index)?;

        if let Err(e) = stream.shutdown(Shutdown::Both) {
            tracing::debug!("Listener {} shutdown of closed peer: {}", self.index, e);
        }
        flow
    }

    fn exchange(&self, stream: &TcpStream, channel: &Channel) -> Result<Flow, ListenerError> {
        let line = wire::read_request(stream).map_err(|source| ListenerError::Read {
            addr: self.addr,
            source,
        })?;
        tracing::debug!("Listener {} read {:?}", self.index, line);

        let (reply, flow) = match self.dispatch.execute(self.index, &line) {
            Outcome::Reply(text) => (Some(text), Flow::Continue),
            Outcome::Terminate(text) => (Some(text), Flow::Stop),
            Outcome::Broadcast(message) => {
                self.broadcast.execute(self.index, &message)?;
                (Some(message), Flow::Continue)
            }
            Outcome::Silent => (None, Flow::Continue),
        };

        // the reply is the last frame: no fan-out may reach this connection after it
        self.desk.lock().sessions.detach(self.index)?;
        if let Some(text) = reply {
            channel.send(&text).map_err(|source| ListenerError::Write {
                addr: self.addr,
                source,
            })?;
            tracing::debug!("Listener {} sent {:?}", self.index, text);
        }
        Ok(flow)
    }
}
