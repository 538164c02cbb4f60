//! In-memory flight stores.

mod flight;

pub use flight::BTreeFlightStore;
