//! Domain layer: flights, sessions and the shared desk context.

pub mod desk;
pub mod entity;
pub mod error;
pub mod inventory;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use desk::{Desk, DeskState};
pub use entity::{Channel, Session, SessionMode};
pub use error::{InventoryError, SessionError, ValueError};
pub use inventory::{Inventory, format_listing};
pub use registry::SessionRegistry;
pub use repository::FlightStore;
pub use value_object::{FlightId, Username};
