//! Entities: per-port sessions and the channel to their open connection.

use std::{
    fmt,
    io::{self, Write},
    net::{Shutdown, TcpStream},
    sync::{Arc, Mutex, PoisonError},
};

use skydesk_shared::wire;

use super::value_object::Username;

/// Command set a session currently accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Reservations and queries (default)
    Desk,
    /// Broadcast chat room
    Chat,
}

/// Writable handle to the connection a listener is currently servicing.
///
/// Clones share one writer behind a mutex, so the owning listener's reply and
/// a broadcast issued from another listener thread are written as whole
/// frames and never interleave.
#[derive(Clone)]
pub struct Channel {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    stream: Option<Arc<TcpStream>>,
}

impl Channel {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            stream: None,
        }
    }

    /// Channel over an accepted connection; [`Channel::close`] can then
    /// unblock whichever thread is reading from it
    pub fn from_stream(stream: &TcpStream) -> io::Result<Self> {
        Ok(Self {
            writer: Arc::new(Mutex::new(Box::new(stream.try_clone()?))),
            stream: Some(Arc::new(stream.try_clone()?)),
        })
    }

    /// Shut the underlying connection down in both directions
    pub fn close(&self) -> io::Result<()> {
        match &self.stream {
            Some(stream) => stream.shutdown(Shutdown::Both),
            None => Ok(()),
        }
    }

    /// Write one reply frame
    pub fn send(&self, text: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        wire::write_frame(&mut **writer, text)
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel").finish_non_exhaustive()
    }
}

/// Logged-on identity of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Name the client asked for
    pub requested: Username,
    /// Name actually assigned (requested name plus a counter on collision)
    pub assigned: Username,
}

/// Session state of one listener port.
///
/// Outlives individual connections: identity and mode persist until the
/// session logs off or its listener exits.
#[derive(Debug, Default)]
pub struct Session {
    identity: Option<Identity>,
    chat_mode: bool,
    broadcasting: bool,
    channel: Option<Channel>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_on(&self) -> bool {
        self.identity.is_some()
    }

    pub fn username(&self) -> Option<&Username> {
        self.identity.as_ref().map(|identity| &identity.assigned)
    }

    pub fn requested_name(&self) -> Option<&Username> {
        self.identity.as_ref().map(|identity| &identity.requested)
    }

    pub fn is_in_chat(&self) -> bool {
        self.chat_mode
    }

    pub fn mode(&self) -> SessionMode {
        if self.chat_mode {
            SessionMode::Chat
        } else {
            SessionMode::Desk
        }
    }

    pub fn is_broadcasting(&self) -> bool {
        self.broadcasting
    }

    pub fn channel(&self) -> Option<&Channel> {
        self.channel.as_ref()
    }

    pub(crate) fn log_on(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Clear identity and chat mode; the channel stays attached
    pub(crate) fn log_off(&mut self) {
        self.identity = None;
        self.chat_mode = false;
        self.broadcasting = false;
    }

    pub(crate) fn set_chat_mode(&mut self, chat_mode: bool) {
        // chat mode is only reachable while logged on
        self.chat_mode = chat_mode && self.is_logged_on();
    }

    pub(crate) fn set_broadcasting(&mut self, broadcasting: bool) {
        self.broadcasting = broadcasting;
    }

    pub(crate) fn attach(&mut self, channel: Channel) {
        self.channel = Some(channel);
    }

    pub(crate) fn detach(&mut self) -> Option<Channel> {
        self.channel.take()
    }
}
