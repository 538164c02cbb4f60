//! Desk: the server context shared by every listener thread.
//!
//! One process-wide lock guards both the inventory and the session table.
//! Reservations, logons (including the full uniqueness scan) and listings
//! each run inside a single guard scope, so no caller sees a partial update
//! and the guard is released on every exit path when it goes out of scope.

use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use super::{inventory::Inventory, registry::SessionRegistry};

/// Data guarded by the desk lock
pub struct DeskState {
    pub inventory: Inventory,
    pub sessions: SessionRegistry,
}

pub struct Desk {
    state: Mutex<DeskState>,
}

impl Desk {
    pub fn new(inventory: Inventory, sessions: SessionRegistry) -> Self {
        Self {
            state: Mutex::new(DeskState {
                inventory,
                sessions,
            }),
        }
    }

    /// Acquire the desk lock.
    ///
    /// A panic inside a critical section cannot leave the state half-written
    /// (every mutation is a single assignment), so a poisoned lock is
    /// recovered instead of propagated.
    pub fn lock(&self) -> MutexGuard<'_, DeskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether another guard is currently alive
    pub fn is_locked(&self) -> bool {
        matches!(self.state.try_lock(), Err(TryLockError::WouldBlock))
    }
}
