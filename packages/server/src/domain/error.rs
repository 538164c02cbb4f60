//! Domain errors.

use thiserror::Error;

/// Errors for value object validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("flight id must not be empty")]
    EmptyFlightId,

    #[error("flight id '{0}' must not contain whitespace")]
    InvalidFlightId(String),

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username '{0}' must not contain whitespace")]
    InvalidUsername(String),
}

/// Outcomes of inventory operations that leave the inventory unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("flight '{0}' not found")]
    NotFound(String),

    #[error("flight '{flight}' has {available} seats left, cannot reserve {requested}")]
    Exhausted {
        flight: String,
        available: u32,
        requested: u32,
    },

    #[error("flight '{flight}' holds {seats} of {max} seats, cannot add {requested}")]
    OverCapacity {
        flight: String,
        seats: u32,
        requested: u32,
        max: u32,
    },
}

/// Session registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Already logged on as {0}")]
    AlreadyLoggedOn(String),

    #[error("Unauthorized: LOGON first")]
    Unauthorized,

    #[error("no session slot {0}")]
    InvalidSession(usize),
}
