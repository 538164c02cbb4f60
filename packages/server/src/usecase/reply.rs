//! Reply texts sent back to clients.

use crate::domain::InventoryError;

pub const ERROR_OCCURRED: &str = "An error occurred";
pub const FLIGHT_FULL: &str = "Flight is Full";
pub const FLIGHT_OVER_CAPACITY: &str = "Flight cannot hold that many seats";
pub const LEFT_CHAT: &str = "Left chat";
pub const GOODBYE: &str = "Goodbye";

/// Result code of a `RESERVE` or `RETURN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReservationCode {
    /// The flight does not exist
    Failed = 0,
    Success = 1,
    /// Not enough seats left, or too many returned
    Rejected = 2,
}

impl ReservationCode {
    pub fn of<T>(result: &Result<T, InventoryError>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(InventoryError::NotFound(_)) => Self::Failed,
            Err(InventoryError::Exhausted { .. } | InventoryError::OverCapacity { .. }) => {
                Self::Rejected
            }
        }
    }
}

pub fn logged_on(name: &str) -> String {
    format!("Logged on as {}", name)
}

pub fn logged_off(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} {}", GOODBYE, name),
        None => GOODBYE.to_string(),
    }
}

pub fn entered_chat(name: &str) -> String {
    format!("Entered chat as {}", name)
}

pub fn reserved(seats: u32, flight: &str) -> String {
    format!("Reserved {} seats on flight {}", seats, flight)
}

pub fn returned(seats: u32, flight: &str) -> String {
    format!("Returned {} seats on flight {}", seats, flight)
}

/// A chat line as every participant sees it
pub fn chat_line(from: &str, message: &str) -> String {
    format!("[{}] {}", from, message)
}
