//! Infrastructure layer: flight store implementations and inventory files.

pub mod error;
pub mod repository;
pub mod seed;
pub mod snapshot;

pub use error::SeedError;
