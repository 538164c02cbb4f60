//! UseCase: chat broadcast
//!
//! The fan-out runs in one desk-lock scope. The sender is flagged as
//! broadcasting for exactly that scope, which keeps it out of its own
//! recipient set. Recipients are the chat-mode sessions whose port is
//! servicing an open connection right now; nothing is queued for the others.

use std::sync::Arc;

use crate::domain::{Desk, SessionError};

pub struct BroadcastUseCase {
    desk: Arc<Desk>,
}

impl BroadcastUseCase {
    pub fn new(desk: Arc<Desk>) -> Self {
        Self { desk }
    }

    /// Send `message` to every other chat participant, returning how many
    /// received it. A failed write to one recipient is logged and skipped.
    pub fn execute(&self, from: usize, message: &str) -> Result<usize, SessionError> {
        let mut state = self.desk.lock();
        state.sessions.set_broadcasting(from, true)?;

        let mut reached = 0;
        for (index, session, channel) in state.sessions.chat_recipients() {
            match channel.send(message) {
                Ok(()) => reached += 1,
                Err(e) => tracing::warn!(
                    "Failed to deliver broadcast to session {} ({:?}): {}",
                    index,
                    session.username().map(|name| name.as_str()),
                    e
                ),
            }
        }

        state.sessions.set_broadcasting(from, false)?;
        tracing::debug!("Session {} broadcast reached {} sessions", from, reached);
        Ok(reached)
    }
}
