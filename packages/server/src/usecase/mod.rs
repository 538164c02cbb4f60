//! UseCase layer: command parsing, dispatch and chat broadcast.

pub mod broadcast;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod reply;

pub use broadcast::BroadcastUseCase;
pub use command::{ChatCommand, DeskCommand, Request};
pub use dispatch::{DispatchUseCase, Outcome};
pub use error::ParseError;
pub use reply::ReservationCode;
