//! Session registry: one fixed slot per listener port.

use super::{
    entity::{Channel, Identity, Session},
    error::SessionError,
    value_object::Username,
};

/// Fixed-capacity session table, indexed by port offset
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Vec<Session>,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: (0..capacity).map(|_| Session::new()).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.sessions.len()
    }

    pub fn session(&self, index: usize) -> Result<&Session, SessionError> {
        self.sessions
            .get(index)
            .ok_or(SessionError::InvalidSession(index))
    }

    fn session_mut(&mut self, index: usize) -> Result<&mut Session, SessionError> {
        self.sessions
            .get_mut(index)
            .ok_or(SessionError::InvalidSession(index))
    }

    /// Log a session on, returning the username it was assigned.
    ///
    /// The assigned name is the requested name with the number of logged-on
    /// sessions that asked for the same name appended (`bob`, `bob1`,
    /// `bob2`, ...). When that candidate is still taken, for instance after a
    /// lower-numbered session logged off, the counter keeps increasing until
    /// the name is unique.
    pub fn logon(&mut self, index: usize, requested: Username) -> Result<Username, SessionError> {
        if let Some(current) = self.session(index)?.username() {
            return Err(SessionError::AlreadyLoggedOn(current.to_string()));
        }

        let mut suffix = self
            .sessions
            .iter()
            .filter(|session| session.requested_name() == Some(&requested))
            .count();

        let assigned = loop {
            let candidate = if suffix == 0 {
                requested.clone()
            } else {
                requested.with_suffix(suffix)
            };
            if !self.is_taken(&candidate) {
                break candidate;
            }
            suffix += 1;
        };

        self.session_mut(index)?.log_on(Identity {
            requested,
            assigned: assigned.clone(),
        });
        Ok(assigned)
    }

    fn is_taken(&self, name: &Username) -> bool {
        self.sessions
            .iter()
            .any(|session| session.username() == Some(name))
    }

    /// Clear the identity and chat mode of a session.
    ///
    /// Returns the username the session had, if any.
    pub fn logoff(&mut self, index: usize) -> Result<Option<Username>, SessionError> {
        let session = self.session_mut(index)?;
        let previous = session.username().cloned();
        session.log_off();
        Ok(previous)
    }

    pub fn enter_chat(&mut self, index: usize) -> Result<(), SessionError> {
        let session = self.session_mut(index)?;
        if !session.is_logged_on() {
            return Err(SessionError::Unauthorized);
        }
        session.set_chat_mode(true);
        Ok(())
    }

    pub fn exit_chat(&mut self, index: usize) -> Result<(), SessionError> {
        self.session_mut(index)?.set_chat_mode(false);
        Ok(())
    }

    pub fn set_broadcasting(&mut self, index: usize, broadcasting: bool) -> Result<(), SessionError> {
        self.session_mut(index)?.set_broadcasting(broadcasting);
        Ok(())
    }

    /// Register the channel of the connection now being serviced
    pub fn attach(&mut self, index: usize, channel: Channel) -> Result<(), SessionError> {
        self.session_mut(index)?.attach(channel);
        Ok(())
    }

    /// Forget the channel once its connection is closed
    pub fn detach(&mut self, index: usize) -> Result<Option<Channel>, SessionError> {
        Ok(self.session_mut(index)?.detach())
    }

    /// Listener-exit cleanup: logged off, out of chat, no channel
    pub fn reset(&mut self, index: usize) -> Result<(), SessionError> {
        let session = self.session_mut(index)?;
        session.log_off();
        session.detach();
        Ok(())
    }

    /// Chat-mode sessions that may receive a broadcast: not broadcasting
    /// themselves and holding an open connection.
    pub fn chat_recipients(&self) -> impl Iterator<Item = (usize, &Session, &Channel)> + '_ {
        self.sessions
            .iter()
            .enumerate()
            .filter(|(_, session)| session.is_in_chat() && !session.is_broadcasting())
            .filter_map(|(index, session)| {
                session.channel().map(|channel| (index, session, channel))
            })
    }

    /// Sessions whose port is servicing an open connection
    pub fn attached(&self) -> impl Iterator<Item = (usize, &Channel)> + '_ {
        self.sessions
            .iter()
            .enumerate()
            .filter_map(|(index, session)| session.channel().map(|channel| (index, channel)))
    }

    /// Every logged-on session
    pub fn list_all(&self) -> String {
        render_users(self.sessions.iter().filter(|session| session.is_logged_on()))
    }

    /// Logged-on sessions in chat mode
    pub fn list_chat_users(&self) -> String {
        render_users(self.sessions.iter().filter(|session| session.is_in_chat()))
    }

    /// Logged-on sessions in desk mode
    pub fn list_offline_users(&self) -> String {
        render_users(
            self.sessions
                .iter()
                .filter(|session| session.is_logged_on() && !session.is_in_chat()),
        )
    }
}

fn render_users<'a>(sessions: impl Iterator<Item = &'a Session>) -> String {
    let mut lines: Vec<String> = sessions
        .filter_map(|session| {
            session.username().map(|name| {
                if session.is_in_chat() {
                    format!("{} online", name)
                } else {
                    name.to_string()
                }
            })
        })
        .collect();
    lines.push(format!("total: {}", lines.len()));
    lines.join("\n")
}
