//! Flight store implementations.

pub mod inmemory;

pub use inmemory::BTreeFlightStore;
